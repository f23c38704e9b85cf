use thiserror::Error;

// ── Transport errors ────────────────────────────────────────────────

/// Failure of the cluster HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("couldn't decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// ── Login errors ────────────────────────────────────────────────────

/// Everything that can abort a login flow.
///
/// Errors from submitting credentials (`Authentication`, `Transport`) are
/// retried in interactive flows. Errors raised while acquiring credentials
/// are fatal as soon as they are raised.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Bad or incompatible combination of command-line flags.
    #[error("{0}")]
    Resolution(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unknown login provider ID '{0}'")]
    UnknownProvider(String),

    #[error("couldn't determine a login provider: no provider is compatible with the given flags")]
    NoProvider,

    #[error("couldn't sign the service login token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl LoginError {
    /// Whether the server rejected the submitted credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
