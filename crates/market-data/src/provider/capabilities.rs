//! Provider capabilities.
//!
//! Describes what the provider can serve so a host can route requests
//! without instantiating fetchers.

/// What a provider can do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Fetchers the provider registers, by host name.
    pub fetchers: &'static [&'static str],

    /// Whether live (intraday) chains are available.
    pub supports_current: bool,

    /// Whether end-of-day chains for past dates are available.
    pub supports_historical: bool,
}

impl ProviderCapabilities {
    pub fn serves(&self, fetcher: &str) -> bool {
        self.fetchers.contains(&fetcher)
    }
}
