//! Symbol resolution against the venue's listings directory.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::cache::ListingsCache;
use super::listings::fetch_listings;
use super::suffixes::clean_symbol;
use super::traits::SymbolResolver;
use crate::config::TmxConfig;
use crate::errors::MarketDataError;
use crate::http::HttpFetch;
use crate::models::ListingDirectory;

/// Resolve a ticker against an already-loaded directory.
///
/// When exactly one listing's underlying contains the cleaned ticker and that
/// underlying differs from its option root (REI.UN → REI, BBD.B → BBD), the
/// option root is used instead.
pub fn resolve_in_directory(
    directory: &ListingDirectory,
    raw_symbol: &str,
) -> Result<String, MarketDataError> {
    let cleaned = clean_symbol(raw_symbol);
    if cleaned.is_empty() {
        return Err(MarketDataError::InvalidSymbol(raw_symbol.to_string()));
    }

    let substitute = {
        let mut matches = directory.matching_underlying(&cleaned);
        match (matches.next(), matches.next()) {
            (Some(only), None) if only.underlying_symbol != only.option_root => {
                Some(only.option_root.clone())
            }
            _ => None,
        }
    };

    let symbol = match substitute {
        Some(root) => {
            debug!("Mapped {} to option root {}", cleaned, root);
            root
        }
        None => cleaned,
    };

    if directory.contains(&symbol) {
        Ok(symbol)
    } else {
        Err(MarketDataError::InvalidSymbol(symbol))
    }
}

/// [`SymbolResolver`] backed by the listings page and a TTL cache.
pub struct ListingResolver {
    http: Arc<dyn HttpFetch>,
    cache: Arc<ListingsCache>,
    config: TmxConfig,
}

impl ListingResolver {
    pub fn new(http: Arc<dyn HttpFetch>, config: TmxConfig) -> Self {
        let cache = Arc::new(ListingsCache::new(config.listings_ttl));
        Self::with_cache(http, cache, config)
    }

    /// Share an existing cache, e.g. between several resolvers.
    pub fn with_cache(
        http: Arc<dyn HttpFetch>,
        cache: Arc<ListingsCache>,
        config: TmxConfig,
    ) -> Self {
        Self {
            http,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<ListingsCache> {
        &self.cache
    }

    /// The cached directory, loading it if needed.
    pub async fn directory(&self) -> Result<Arc<ListingDirectory>, MarketDataError> {
        self.cache
            .get_or_load(|| fetch_listings(self.http.as_ref(), &self.config))
            .await
    }
}

#[async_trait]
impl SymbolResolver for ListingResolver {
    async fn resolve(&self, raw_symbol: &str) -> Result<String, MarketDataError> {
        let directory = self.directory().await?;
        resolve_in_directory(&directory, raw_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{FakeHttp, LISTINGS_HTML};
    use crate::resolver::listings::parse_listings_page;

    fn resolver() -> (Arc<FakeHttp>, ListingResolver) {
        let config = TmxConfig::default();
        let http = Arc::new(FakeHttp::new().with_body(config.listings_url(), LISTINGS_HTML));
        let resolver = ListingResolver::new(http.clone(), config);
        (http, resolver)
    }

    #[tokio::test]
    async fn test_exchange_suffixes_resolve_the_same() {
        let (_, resolver) = resolver();

        let plain = resolver.resolve("RY").await.unwrap();
        assert_eq!(plain, "RY");
        assert_eq!(resolver.resolve("RY.TO").await.unwrap(), plain);
        assert_eq!(resolver.resolve("RY.TSX").await.unwrap(), plain);
        assert_eq!(resolver.resolve(" ry.to ").await.unwrap(), plain);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_invalid() {
        let (_, resolver) = resolver();

        let err = resolver.resolve("NOT-A-REAL-TICKER-XYZ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::InvalidSymbol(_)));
        assert!(err.to_string().contains("NOT-A-REAL-TICKER-XYZ"));
    }

    #[tokio::test]
    async fn test_directory_is_loaded_once() {
        let (http, resolver) = resolver();

        resolver.resolve("RY").await.unwrap();
        resolver.resolve("TD").await.unwrap();
        let _ = resolver.resolve("NOPE").await;

        assert_eq!(http.calls_to("listings").len(), 1);
    }

    #[tokio::test]
    async fn test_listings_failure_is_upstream_error() {
        let config = TmxConfig::default();
        let http = Arc::new(FakeHttp::new().with_status(config.listings_url(), 503));
        let resolver = ListingResolver::new(http, config);

        let err = resolver.resolve("RY").await.unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn test_unit_trust_maps_to_option_root() {
        let directory = parse_listings_page(LISTINGS_HTML);
        assert_eq!(resolve_in_directory(&directory, "REI.UN").unwrap(), "REI");
        assert_eq!(resolve_in_directory(&directory, "rei.un.to").unwrap(), "REI");
    }

    #[test]
    fn test_share_class_maps_to_option_root() {
        let directory = parse_listings_page(LISTINGS_HTML);
        assert_eq!(resolve_in_directory(&directory, "BBD.B").unwrap(), "BBD");
        assert_eq!(resolve_in_directory(&directory, "BBD").unwrap(), "BBD");
    }

    #[test]
    fn test_blank_symbol_is_invalid() {
        let directory = parse_listings_page(LISTINGS_HTML);
        assert!(matches!(
            resolve_in_directory(&directory, "  "),
            Err(MarketDataError::InvalidSymbol(_))
        ));
    }
}
