//! Client for the cluster's authentication API.

use serde::Deserialize;
use tracing::debug;

use super::error::{LoginError, TransportError};
use super::provider::{Credentials, Providers};
use super::transport::{Response, Transport};

/// Endpoint listing the login providers configured on the cluster.
pub const PROVIDERS_PATH: &str = "/acs/api/v1/auth/providers";

/// Login endpoint used when a provider doesn't specify its own.
pub const DEFAULT_LOGIN_PATH: &str = "/acs/api/v1/auth/login";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Error payload returned by the authentication service.
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

pub struct Client<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Client<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &'a dyn Transport {
        self.transport
    }

    /// Fetches the providers catalog. One round-trip, no retry.
    pub fn providers(&self) -> Result<Providers, LoginError> {
        let response = self.transport.get(PROVIDERS_PATH)?;
        if !response.is_success() {
            return Err(TransportError::Status {
                url: self.describe(PROVIDERS_PATH),
                status: response.status,
            }
            .into());
        }
        let providers: Providers =
            serde_json::from_slice(&response.body).map_err(|source| TransportError::Decode {
                url: self.describe(PROVIDERS_PATH),
                source,
            })?;
        debug!(count = providers.len(), "fetched login providers");
        Ok(providers)
    }

    /// Submits credentials and returns the access token the cluster issues.
    ///
    /// `endpoint` falls back to [`DEFAULT_LOGIN_PATH`] when absent or empty.
    pub fn login(
        &self,
        endpoint: Option<&str>,
        credentials: &Credentials,
    ) -> Result<String, LoginError> {
        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_LOGIN_PATH);
        let body = serde_json::to_value(credentials).map_err(|source| TransportError::Decode {
            url: self.describe(endpoint),
            source,
        })?;

        let response = self.transport.post_json(endpoint, &body)?;
        if !response.is_success() {
            return Err(LoginError::Authentication {
                status: response.status,
                message: rejection_message(&response),
            });
        }

        let login: LoginResponse =
            serde_json::from_slice(&response.body).map_err(|source| TransportError::Decode {
                url: self.describe(endpoint),
                source,
            })?;
        Ok(login.token)
    }

    fn describe(&self, path: &str) -> String {
        self.transport
            .url(path)
            .map_or_else(|_| path.to_string(), |url| url.to_string())
    }
}

fn rejection_message(response: &Response) -> String {
    let error: ApiError = serde_json::from_slice(&response.body).unwrap_or_default();
    if !error.description.is_empty() {
        error.description
    } else if !error.title.is_empty() {
        error.title
    } else {
        "the cluster rejected the login request".to_string()
    }
}
