//! Host-facing fetchers.
//!
//! - `traits` - The [`Fetcher`] contract (transform query, extract, transform data)
//! - `options_chains` - [`TmxOptionsChainsFetcher`], live or end-of-day chains
//! - `validator` - Row checks applied in `transform_data`

mod options_chains;
mod traits;
mod validator;

pub use options_chains::{TmxOptionsChainsFetcher, OPTIONS_CHAINS};
pub use traits::Fetcher;
pub use validator::{
    ChainRowValidator, ValidationIssue, ValidationSeverity, ValidatorConfig,
};
