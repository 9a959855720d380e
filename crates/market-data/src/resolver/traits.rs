//! Resolution traits for the market data crate.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Maps a user ticker to the option root the venue lists it under.
///
/// Implementations return [`MarketDataError::InvalidSymbol`] when the ticker
/// has no listed options.
#[async_trait]
pub trait SymbolResolver: Send + Sync {
    async fn resolve(&self, raw_symbol: &str) -> Result<String, MarketDataError>;
}
