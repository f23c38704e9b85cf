#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::doc_markdown, clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{fmt, EnvFilter};

use cluster_login::login::{ClusterTransport, Flags, Flow, FlowOpts};
use cluster_login::Config;

/// Log in to a cluster and print the access token.
#[derive(Parser, Debug)]
#[command(name = "cluster-login")]
#[command(version)]
#[command(about = "Log in to a cluster's authentication service.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and print the access token on stdout
    Login {
        /// Cluster base URL (overrides config and CLUSTER_LOGIN_URL)
        #[arg(long)]
        url: Option<String>,

        /// Login provider ID to use, skipping provider selection
        #[arg(long)]
        provider: Option<String>,

        /// Username, prompted for when needed and not given
        #[arg(long)]
        username: Option<String>,

        /// Password
        #[arg(long, conflicts_with_all = ["password_file", "password_env"])]
        password: Option<String>,

        /// Read the password from a file
        #[arg(long, conflicts_with = "password_env")]
        password_file: Option<PathBuf>,

        /// Read the password from an environment variable
        #[arg(long)]
        password_env: Option<String>,

        /// Service account private key (PEM)
        #[arg(long)]
        private_key: Option<PathBuf>,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match cli.command {
        Commands::Login {
            url,
            provider,
            username,
            password,
            password_file,
            password_env,
            private_key,
            insecure,
        } => {
            let mut config = Config::load()?;
            if url.is_some() {
                config.url = url;
            }
            config.insecure |= insecure;

            let base_url = config.url.as_deref().context(
                "No cluster URL configured. Pass --url or set CLUSTER_LOGIN_URL.",
            )?;
            let transport = ClusterTransport::new(base_url, config.timeout(), config.insecure)?;

            let flags = Flags {
                provider,
                username,
                password,
                password_file,
                password_env,
                private_key,
            };
            let token = Flow::new(FlowOpts::default()).start(flags, &transport)?;

            eprintln!(
                "{} Logged in to {}",
                style("✓").green().bold(),
                transport.base_url()
            );
            println!("{token}");
            Ok(())
        }
    }
}
