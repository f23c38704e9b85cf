#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::needless_pass_by_value,
    clippy::return_self_not_must_use,
    clippy::uninlined_format_args
)]

//! Login flow for cluster management CLIs.
//!
//! See [`login::Flow`] for the entry point.

pub mod config;
pub mod login;

pub use config::Config;
pub use login::{Flags, Flow, FlowOpts, LoginError};
