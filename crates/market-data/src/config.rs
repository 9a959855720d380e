//! Provider configuration.
//!
//! Defaults point at the production Montréal Exchange pages. Every value can
//! be overridden from the environment (or a `.env` file):
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TMX_BASE_URL` | Origin of the exchange data pages | `https://www.m-x.ca` |
//! | `TMX_REQUEST_TIMEOUT_MS` | Per-request timeout | `10000` |
//! | `TMX_LISTINGS_TTL_SECS` | Lifetime of the cached listings directory | `86400` |
//! | `TMX_USER_AGENT` | Fixed user agent (disables rotation) | unset |

use std::time::Duration;

use log::warn;

pub const DEFAULT_BASE_URL: &str = "https://www.m-x.ca";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const MIN_TIMEOUT_MS: u64 = 1_000;
const MAX_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_LISTINGS_TTL_SECS: u64 = 24 * 60 * 60;

const LISTINGS_PATH: &str = "/en/trading/data/options-list";
const QUOTES_PATH: &str = "/en/trading/data/quotes";
const HISTORICAL_PATH: &str = "/en/trading/data/historical";

/// Settings shared by the resolver and both chain retrievers.
#[derive(Clone, Debug)]
pub struct TmxConfig {
    /// Origin of the data pages, without a trailing slash.
    pub base_url: String,

    /// Upper bound on each upstream call.
    pub request_timeout: Duration,

    /// How long a loaded listings directory stays valid.
    pub listings_ttl: Duration,

    /// When set, sent on every request instead of a rotating agent.
    pub user_agent: Option<String>,
}

impl Default for TmxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            listings_ttl: Duration::from_secs(DEFAULT_LISTINGS_TTL_SECS),
            user_agent: None,
        }
    }
}

impl TmxConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("TMX_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_ms = parse_u64(&lookup, "TMX_REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)
            .clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);

        let ttl_secs = parse_u64(&lookup, "TMX_LISTINGS_TTL_SECS", DEFAULT_LISTINGS_TTL_SECS);

        let user_agent = lookup("TMX_USER_AGENT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Self {
            base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            listings_ttl: Duration::from_secs(ttl_secs),
            user_agent,
        }
    }

    pub fn listings_url(&self) -> String {
        format!("{}{}", self.base_url, LISTINGS_PATH)
    }

    pub fn quotes_url(&self) -> String {
        format!("{}{}", self.base_url, QUOTES_PATH)
    }

    pub fn historical_url(&self) -> String {
        format!("{}{}", self.base_url, HISTORICAL_PATH)
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
