//! Options-chain fetcher: routes a request to the live or end-of-day chain.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;

use super::traits::Fetcher;
use super::validator::ChainRowValidator;
use crate::calendar::DateNormalizer;
use crate::chain::{CurrentChainRetriever, HistoricalChainRetriever};
use crate::config::TmxConfig;
use crate::errors::MarketDataError;
use crate::http::{HttpFetch, ReqwestFetch};
use crate::models::{ChainRequest, OptionContractRow, OptionsChainData};
use crate::resolver::ListingResolver;

pub const OPTIONS_CHAINS: &str = "OptionsChains";

pub struct TmxOptionsChainsFetcher {
    resolver: Arc<ListingResolver>,
    current: CurrentChainRetriever,
    historical: HistoricalChainRetriever,
    validator: ChainRowValidator,
}

impl TmxOptionsChainsFetcher {
    /// Build over the reqwest transport.
    pub fn from_config(config: TmxConfig) -> Result<Self, MarketDataError> {
        let http: Arc<dyn HttpFetch> = Arc::new(ReqwestFetch::new(&config)?);
        Ok(Self::with_http(http, config))
    }

    /// Build over any [`HttpFetch`]; the resolver and both retrievers share it.
    pub fn with_http(http: Arc<dyn HttpFetch>, config: TmxConfig) -> Self {
        Self::with_normalizer(http, config, DateNormalizer::default())
    }

    pub fn with_normalizer(
        http: Arc<dyn HttpFetch>,
        config: TmxConfig,
        normalizer: DateNormalizer,
    ) -> Self {
        let resolver = Arc::new(ListingResolver::new(Arc::clone(&http), config.clone()));

        Self {
            current: CurrentChainRetriever::new(
                Arc::clone(&http),
                resolver.clone(),
                config.clone(),
            ),
            historical: HistoricalChainRetriever::new(http, resolver.clone(), normalizer, config),
            resolver,
            validator: ChainRowValidator::new(),
        }
    }

    /// Replace the exchange-local clock of the live retriever.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.current = self.current.with_clock(clock);
        self
    }

    pub fn resolver(&self) -> &Arc<ListingResolver> {
        &self.resolver
    }

    /// No date → live chain; date → end-of-day chain for the adjusted date.
    pub async fn fetch(
        &self,
        request: &ChainRequest,
    ) -> Result<Vec<OptionContractRow>, MarketDataError> {
        match request.date {
            None => {
                info!("Fetching live options chain for {}", request.symbol);
                self.current.fetch_current(&request.symbol).await
            }
            Some(date) => {
                info!("Fetching {} options chain for {}", date, request.symbol);
                self.historical.fetch_historical(&request.symbol, date).await
            }
        }
    }
}

#[async_trait]
impl Fetcher for TmxOptionsChainsFetcher {
    type Query = ChainRequest;
    type Raw = Vec<OptionContractRow>;
    type Data = OptionsChainData;

    fn name(&self) -> &'static str {
        OPTIONS_CHAINS
    }

    fn transform_query(&self, params: serde_json::Value) -> Result<ChainRequest, MarketDataError> {
        ChainRequest::from_params(params)
    }

    async fn extract_data(
        &self,
        query: &ChainRequest,
    ) -> Result<Vec<OptionContractRow>, MarketDataError> {
        self.fetch(query).await
    }

    fn transform_data(
        &self,
        _query: &ChainRequest,
        raw: Vec<OptionContractRow>,
    ) -> Result<Vec<OptionsChainData>, MarketDataError> {
        raw.into_iter()
            .map(OptionsChainData::from)
            .map(|row| self.validator.validate(&row).map(|_| row))
            .collect()
    }
}
