//! Command-line login flags and their one-time resolution.

use std::fs;
use std::path::PathBuf;

use super::error::LoginError;
use super::provider::{ClientMethod, Provider};

/// Raw login flags as given on the command line.
///
/// They must go through [`Flags::resolve`] before the flow can use them.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub provider: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub password_file: Option<PathBuf>,
    pub password_env: Option<String>,
    pub private_key: Option<PathBuf>,
}

/// Validated, normalized flags. Only obtainable by consuming [`Flags`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedFlags {
    provider_id: String,
    username: String,
    password: String,
    private_key: Option<Vec<u8>>,
}

impl Flags {
    /// Reads password and private key sources and rejects contradictory
    /// combinations.
    pub fn resolve(self) -> Result<ResolvedFlags, LoginError> {
        let password_sources = [
            self.password.is_some(),
            self.password_file.is_some(),
            self.password_env.is_some(),
        ];
        if password_sources.iter().filter(|set| **set).count() > 1 {
            return Err(LoginError::Resolution(
                "--password, --password-file and --password-env can't be used together".into(),
            ));
        }

        let password = if let Some(path) = &self.password_file {
            let raw = fs::read_to_string(path).map_err(|e| {
                LoginError::Resolution(format!(
                    "couldn't read password file {}: {e}",
                    path.display()
                ))
            })?;
            raw.trim().to_string()
        } else if let Some(var) = &self.password_env {
            std::env::var(var).map_err(|_| {
                LoginError::Resolution(format!("environment variable {var} is not set"))
            })?
        } else {
            self.password.unwrap_or_default()
        };

        let private_key = match &self.private_key {
            Some(path) => Some(fs::read(path).map_err(|e| {
                LoginError::Resolution(format!(
                    "couldn't read private key {}: {e}",
                    path.display()
                ))
            })?),
            None => None,
        };

        if !password.is_empty() && private_key.is_some() {
            return Err(LoginError::Resolution(
                "a password and --private-key can't be used together".into(),
            ));
        }

        Ok(ResolvedFlags {
            provider_id: self.provider.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            password,
            private_key,
        })
    }
}

impl ResolvedFlags {
    pub fn provider_id(&self) -> Option<&str> {
        non_empty(&self.provider_id)
    }

    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    /// Whether the flag combination can be used with a provider.
    pub fn supports(&self, provider: &Provider) -> bool {
        match provider.client_method {
            ClientMethod::Credential | ClientMethod::UserCredential => self.private_key.is_none(),
            ClientMethod::ServiceCredential => self.private_key.is_some(),
            ClientMethod::BrowserToken => {
                self.username().is_none() && self.password().is_none() && self.private_key.is_none()
            }
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
