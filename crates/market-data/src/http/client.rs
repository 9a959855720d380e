//! reqwest-backed [`HttpFetch`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use super::headers::{random_user_agent, tmx_headers};
use super::traits::{HttpFetch, HttpRequest};
use crate::config::TmxConfig;
use crate::errors::MarketDataError;

/// Production transport: one GET per call, bounded by a timeout, no retries.
#[derive(Clone)]
pub struct ReqwestFetch {
    client: Client,
    default_timeout: Duration,
    user_agent: Option<String>,
}

impl ReqwestFetch {
    /// Create a transport from the provider configuration.
    pub fn new(config: &TmxConfig) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .default_headers(tmx_headers())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                MarketDataError::upstream("client", format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            default_timeout: config.request_timeout,
            user_agent: config.user_agent.clone(),
        })
    }

    fn transport_error(
        endpoint: &str,
        timeout: Duration,
        error: reqwest::Error,
    ) -> MarketDataError {
        if error.is_timeout() {
            MarketDataError::upstream(
                endpoint,
                format!("Request timed out after {} ms", timeout.as_millis()),
            )
        } else {
            MarketDataError::upstream(endpoint, error.to_string())
        }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_text(&self, request: HttpRequest) -> Result<String, MarketDataError> {
        let timeout = request.timeout.unwrap_or(self.default_timeout);
        let agent = match self.user_agent.as_deref() {
            Some(agent) => agent,
            None => random_user_agent(),
        };

        debug!(
            "GET {} {:?} (endpoint: {}, timeout: {:?})",
            request.url, request.query, request.endpoint, timeout
        );

        let mut builder = self
            .client
            .get(&request.url)
            .query(&request.query)
            .header(USER_AGENT, agent)
            .timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::transport_error(request.endpoint, timeout, e))?;

        if !response.status().is_success() {
            return Err(MarketDataError::upstream(
                request.endpoint,
                format!("HTTP error: {}", response.status()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| Self::transport_error(request.endpoint, timeout, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config_for(server: &mockito::ServerGuard) -> TmxConfig {
        TmxConfig {
            base_url: server.url(),
            user_agent: Some("tmx-test".to_string()),
            ..TmxConfig::default()
        }
    }

    #[tokio::test]
    async fn test_returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/en/trading/data/quotes")
            .match_query(Matcher::UrlEncoded("symbol".into(), "RY*".into()))
            .match_header("user-agent", "tmx-test")
            .with_status(200)
            .with_body("<table></table>")
            .create_async()
            .await;

        let config = config_for(&server);
        let fetch = ReqwestFetch::new(&config).unwrap();
        let body = fetch
            .get_text(HttpRequest::get("quotes", config.quotes_url()).query("symbol", "RY*"))
            .await
            .unwrap();

        assert_eq!(body, "<table></table>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rotates_browser_agent_when_none_configured() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/en/trading/data/quotes")
            .match_query(Matcher::Any)
            .match_header("user-agent", Matcher::Regex("^Mozilla/5.0 ".to_string()))
            .with_status(200)
            .with_body("ok")
            .expect(2)
            .create_async()
            .await;

        let config = TmxConfig {
            user_agent: None,
            ..config_for(&server)
        };
        let fetch = ReqwestFetch::new(&config).unwrap();
        for _ in 0..2 {
            let body = fetch
                .get_text(HttpRequest::get("quotes", config.quotes_url()))
                .await
                .unwrap();
            assert_eq!(body, "ok");
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/en/trading/data/historical")
            .match_query(Matcher::Any)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let config = config_for(&server);
        let fetch = ReqwestFetch::new(&config).unwrap();
        let result = fetch
            .get_text(HttpRequest::get("historical", config.historical_url()).query("dnld", "1"))
            .await;

        match result {
            Err(MarketDataError::UpstreamUnavailable { endpoint, message }) => {
                assert_eq!(endpoint, "historical");
                assert!(message.contains("503"));
            }
            other => panic!("expected UpstreamUnavailable, got {:?}", other),
        }
        // Called exactly once: no retries.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/en/trading/data/options-list")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(b"<table></table>")
            })
            .create_async()
            .await;

        let config = TmxConfig {
            request_timeout: Duration::from_secs(1),
            ..config_for(&server)
        };
        let fetch = ReqwestFetch::new(&config).unwrap();
        let result = fetch
            .get_text(HttpRequest::get("listings", config.listings_url()))
            .await;

        match result {
            Err(MarketDataError::UpstreamUnavailable { endpoint, message }) => {
                assert_eq!(endpoint, "listings");
                assert!(message.contains("timed out"), "message: {}", message);
            }
            other => panic!("expected UpstreamUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_unavailable() {
        let config = TmxConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(1),
            ..TmxConfig::default()
        };
        let fetch = ReqwestFetch::new(&config).unwrap();
        let result = fetch
            .get_text(HttpRequest::get("listings", config.listings_url()))
            .await;

        assert!(matches!(
            result,
            Err(MarketDataError::UpstreamUnavailable { .. })
        ));
    }
}
