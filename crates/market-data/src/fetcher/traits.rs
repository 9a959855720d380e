//! Host fetch contract.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// The three-step contract a host drives every data fetch through.
///
/// `transform_query` validates raw parameters, `extract_data` talks to the
/// upstream, and `transform_data` turns the raw result into standardized
/// rows. Any error aborts the whole fetch.
///
/// # Example
///
/// ```ignore
/// use tmx_market_data::fetcher::{Fetcher, TmxOptionsChainsFetcher};
///
/// let fetcher = TmxOptionsChainsFetcher::from_config(TmxConfig::from_env())?;
/// let rows = fetcher
///     .fetch_data(serde_json::json!({ "symbol": "RY.TO", "date": "2024-06-21" }))
///     .await?;
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Validated query.
    type Query: Send + Sync;

    /// Upstream result before standardization.
    type Raw: Send;

    /// Standardized output row.
    type Data: Send;

    /// Name the host registers this fetcher under.
    fn name(&self) -> &'static str;

    fn transform_query(&self, params: serde_json::Value) -> Result<Self::Query, MarketDataError>;

    async fn extract_data(&self, query: &Self::Query) -> Result<Self::Raw, MarketDataError>;

    fn transform_data(
        &self,
        query: &Self::Query,
        raw: Self::Raw,
    ) -> Result<Vec<Self::Data>, MarketDataError>;

    /// Run all three steps.
    async fn fetch_data(
        &self,
        params: serde_json::Value,
    ) -> Result<Vec<Self::Data>, MarketDataError> {
        let query = self.transform_query(params)?;
        let raw = self.extract_data(&query).await?;
        self.transform_data(&query, raw)
    }
}
