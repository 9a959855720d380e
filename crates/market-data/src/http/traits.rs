//! HTTP fetch abstraction.
//!
//! The chain retrievers and the listings loader only ever issue a single
//! GET and read the body as text. They go through [`HttpFetch`] so tests can
//! substitute canned pages for the network.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// A GET request against one of the venue's pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Short label used in error messages ("listings", "quotes", "historical").
    pub endpoint: &'static str,

    /// URL without query string.
    pub url: String,

    /// Query parameters, in order.
    pub query: Vec<(String, String)>,

    /// Extra headers on top of the transport defaults.
    pub headers: Vec<(String, String)>,

    /// Overrides the transport's default timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn get(endpoint: &'static str, url: impl Into<String>) -> Self {
        Self {
            endpoint,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            timeout: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Capability to GET a page and return its body.
///
/// Implementations must bound the wait and report every failure (transport
/// error, timeout, non-success status, undecodable body) as
/// [`MarketDataError::UpstreamUnavailable`]. They must not retry.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get_text(&self, request: HttpRequest) -> Result<String, MarketDataError>;
}
