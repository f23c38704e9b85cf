use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the directory under the user's home holding `config.toml`.
const CONFIG_DIR: &str = ".cluster-login";

// ── Top-level config ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from. Computed, never serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base URL of the target cluster, e.g. `https://cluster.example.com`.
    #[serde(default)]
    pub url: Option<String>,

    /// HTTP request timeout (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification (default: false)
    #[serde(default)]
    pub insecure: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            url: None,
            timeout_secs: default_timeout_secs(),
            insecure: false,
        }
    }
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Config {
    /// Loads `~/.cluster-login/config.toml` if present, then applies
    /// environment overrides. The file is never written.
    pub fn load() -> Result<Self> {
        let home = UserDirs::new().map(|u| u.home_dir().to_path_buf());
        let mut config = Self::load_from_home(home.as_deref())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Without a home directory there is no config file to read, so the
    /// defaults apply.
    fn load_from_home(home: Option<&Path>) -> Result<Self> {
        match home {
            Some(home) => Self::load_from(&home.join(CONFIG_DIR).join("config.toml")),
            None => {
                tracing::warn!("Could not find home directory, using default config");
                Ok(Config::default())
            }
        }
    }

    /// Reads a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Config::default()
        };
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Cluster URL: CLUSTER_LOGIN_URL
        if let Some(url) = lookup("CLUSTER_LOGIN_URL") {
            if !url.is_empty() {
                self.url = Some(url);
            }
        }

        // Timeout: CLUSTER_LOGIN_TIMEOUT_SECS (ignored unless a positive integer)
        if let Some(timeout) = lookup("CLUSTER_LOGIN_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout_secs = secs,
                _ => tracing::warn!("Ignoring invalid CLUSTER_LOGIN_TIMEOUT_SECS={timeout:?}"),
            }
        }

        // TLS verification: CLUSTER_LOGIN_INSECURE
        if let Some(insecure) = lookup("CLUSTER_LOGIN_INSECURE") {
            self.insecure = parse_bool_env(&insecure);
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
