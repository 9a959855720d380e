//! TMX Market Data Crate
//!
//! Options-chain data provider for the TMX group (Montréal Exchange).
//! Fetches the live quote table or the end-of-day export for a symbol and
//! reshapes it into the host's standard options-chain rows.
//!
//! # Architecture
//!
//! ```text
//!                          +------------------+
//!                          |   ChainRequest   |  (symbol + optional date)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  SymbolResolver  |  (listings directory, TTL cache)
//!                          +------------------+
//!                             |            |
//!                    no date  |            |  date
//!                             v            v
//!               +----------------+     +------------------+
//!               | Current chain  |     |  DateNormalizer  |  (weekends, holidays)
//!               | (quotes page)  |     +------------------+
//!               +----------------+              |
//!                             |                 v
//!                             |       +------------------+
//!                             |       | Historical chain |  (CSV export)
//!                             |       +------------------+
//!                             v            v
//!                          +------------------+
//!                          | OptionsChainData |  (validated rows)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`TmxOptionsChainsFetcher`] - Entry point; implements [`Fetcher`]
//! - [`ChainRequest`] - Validated query
//! - [`OptionContractRow`] - One contract as parsed from the venue
//! - [`OptionsChainData`] - Standardized output row
//! - [`HttpFetch`] - Transport seam; [`ReqwestFetch`] in production
//! - [`TmxConfig`] - Endpoints, timeout and cache TTL

pub mod calendar;
pub mod chain;
pub mod config;
pub mod errors;
pub mod fetcher;
mod html_table;
pub mod http;
pub mod models;
pub mod provider;
pub mod resolver;

pub use calendar::{DateNormalizer, HolidayCalendar};
pub use config::TmxConfig;
pub use errors::{ErrorClass, MarketDataError};
pub use fetcher::{ChainRowValidator, Fetcher, TmxOptionsChainsFetcher};
pub use http::{HttpFetch, HttpRequest, ReqwestFetch};
pub use models::{
    ChainKey, ChainRequest, Listing, ListingDirectory, OptionContractRow, OptionType,
    OptionsChainData,
};
pub use provider::{tmx_provider, ProviderCapabilities, ProviderInfo};
pub use resolver::{ListingResolver, ListingsCache, SymbolResolver};
