//! Login providers as advertised by the cluster's authentication service,
//! and the credentials submitted to them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ── Client methods ──────────────────────────────────────────────────

/// The protocol a provider expects the CLI to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ClientMethod {
    /// Default cluster user store: POST uid/password, receive a token.
    #[serde(rename = "dcos-credential-post-receive-authtoken")]
    Credential,
    /// Directory-backed (LDAP) users: POST uid/password, receive a token.
    #[serde(rename = "dcos-usercredential-post-receive-authtoken")]
    UserCredential,
    /// Service accounts: POST uid and a token signed with their private key.
    #[serde(rename = "dcos-servicecredential-post-receive-authtoken")]
    ServiceCredential,
    /// SSO (OIDC, SAML): the user logs in through the browser and pastes
    /// back the token it displays.
    #[serde(rename = "browser-prompt-authtoken")]
    BrowserToken,
}

// ── Providers ───────────────────────────────────────────────────────

/// Provider-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Where to POST credentials for credential methods, or the page that
    /// starts the flow for the browser method. May be root-relative.
    #[serde(default)]
    pub start_flow_url: String,
}

/// A configured authentication backend exposed by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Provider {
    /// Catalog key. Not part of the provider object on the wire.
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "client-method")]
    pub client_method: ClientMethod,
    #[serde(default)]
    pub config: ProviderConfig,
}

impl Provider {
    /// Human-readable name: the description, or the ID when there is none.
    fn name(&self) -> &str {
        if self.description.is_empty() {
            &self.id
        } else {
            &self.description
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_str() {
            "dcos-uid-password" => {
                write!(f, "Log in using a standard DC/OS user account (username and password)")
            }
            "dcos-uid-servicekey" => {
                write!(f, "Log in using a DC/OS service user account (username and private key)")
            }
            "dcos-uid-password-ldap" => {
                write!(f, "Log in using an LDAP user account (username and password)")
            }
            "saml-sp-initiated" => write!(f, "Log in using SAML 2.0 ({})", self.name()),
            "oidc-authorization-code-flow" | "oidc-implicit-flow" => {
                write!(f, "Log in using OpenID Connect ({})", self.name())
            }
            _ => write!(f, "{}", self.id),
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────

/// The set of providers offered by a cluster, keyed by provider ID.
///
/// Iteration is in ascending ID order so that candidate filtering and the
/// selection menu are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Providers(BTreeMap<String, Provider>);

impl Providers {
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Provider> for Providers {
    fn from_iter<I: IntoIterator<Item = Provider>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.id.clone(), p)).collect())
    }
}

impl<'de> Deserialize<'de> for Providers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = BTreeMap::<String, Provider>::deserialize(deserializer)?;
        for (id, provider) in &mut map {
            provider.id.clone_from(id);
        }
        Ok(Self(map))
    }
}

// ── Credentials ─────────────────────────────────────────────────────

/// Body of a login request. Which fields are set depends on the method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
