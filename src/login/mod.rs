//! Interactive login against a cluster's authentication service.
//!
//! The flow fetches the login providers the cluster offers, selects one
//! (explicitly by ID, implicitly when only one fits the command-line flags,
//! or by asking the user), then follows the provider's client method:
//!
//! - **Credential / UserCredential**: POST a UID and password
//! - **ServiceCredential**: POST a UID and a JWT signed with the service
//!   account's private key
//! - **BrowserToken**: open the SSO start page and ask the user to paste
//!   the token it shows
//!
//! The cluster answers with an access token. Interactive flows get up to
//! three attempts; fully flag-driven ones fail on the first rejection.

pub mod browser;
pub mod client;
pub mod credentials;
pub mod error;
pub mod flags;
pub mod flow;
pub mod prompt;
pub mod provider;
pub mod selector;
pub mod service_token;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{LoginError, TransportError};
pub use flags::{Flags, ResolvedFlags};
pub use flow::{Flow, FlowOpts, MAX_LOGIN_ATTEMPTS};
pub use provider::{ClientMethod, Credentials, Provider, ProviderConfig, Providers};
pub use transport::{ClusterTransport, Transport};
