//! HTTP transport to the target cluster.

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::error::TransportError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request/response primitives the login flow needs from the cluster.
///
/// Paths may be absolute URLs or root-relative; relative ones are resolved
/// against the cluster base URL.
pub trait Transport {
    /// Resolves a path against the cluster base URL.
    fn url(&self, path: &str) -> Result<Url, TransportError>;

    fn get(&self, path: &str) -> Result<Response, TransportError>;

    fn post_json(&self, path: &str, body: &Value) -> Result<Response, TransportError>;
}

/// Blocking reqwest transport bound to one cluster.
#[derive(Debug, Clone)]
pub struct ClusterTransport {
    base: Url,
    http: HttpClient,
}

impl ClusterTransport {
    pub fn new(base_url: &str, timeout: Duration, insecure: bool) -> Result<Self, TransportError> {
        let base = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        let http = HttpClient::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .user_agent(concat!("cluster-login/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| TransportError::Request {
                url: base.to_string(),
                source,
            })?;
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn send(
        &self,
        url: Url,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Response, TransportError> {
        let response = request.send().map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?
            .to_vec();
        debug!(%url, status, "cluster request completed");
        Ok(Response { status, body })
    }
}

impl Transport for ClusterTransport {
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        resolve_url(&self.base, path)
    }

    fn get(&self, path: &str) -> Result<Response, TransportError> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let request = self.http.get(url.clone());
        self.send(url, request)
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<Response, TransportError> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        let request = self.http.post(url.clone()).json(body);
        self.send(url, request)
    }
}

/// Joins `path` onto `base` unless `path` is already an absolute URL.
pub fn resolve_url(base: &Url, path: &str) -> Result<Url, TransportError> {
    let invalid = |e: url::ParseError| TransportError::InvalidUrl {
        url: path.to_string(),
        reason: e.to_string(),
    };
    match Url::parse(path) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(path).map_err(invalid),
        Err(e) => Err(invalid(e)),
    }
}
