//! Error types and error classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all options-chain operations
//! - [`ErrorClass`]: Classification for deciding how the host surfaces an error

mod class;

pub use class::ErrorClass;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while resolving, fetching or normalizing a chain.
///
/// Each variant is classified into an [`ErrorClass`] via the [`class`](Self::class)
/// method. Nothing in this crate retries on any of them.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The symbol has no tradable options listing on the venue.
    #[error("{0} is not a valid symbol with listed options")]
    InvalidSymbol(String),

    /// An upstream call failed: transport error, timeout, non-success
    /// status, or a body that could not be read.
    #[error("Upstream unavailable: {endpoint} - {message}")]
    UpstreamUnavailable {
        /// The upstream page that failed (e.g. "quotes", "historical")
        endpoint: String,
        /// What went wrong
        message: String,
    },

    /// The end-of-day export has no rows for the symbol on that date.
    #[error("No data found for {symbol} on {date}")]
    NoDataForDate {
        /// Canonical option root symbol
        symbol: String,
        /// The adjusted trading date that was queried
        date: NaiveDate,
    },

    /// The weekend/holiday roll-forward did not settle on a trading day.
    #[error("Could not resolve a trading day from {date} after {passes} passes")]
    DateResolution {
        /// The date as originally requested
        date: NaiveDate,
        /// Number of passes attempted
        passes: usize,
    },

    /// Raw query parameters could not be turned into a chain request.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A row failed the output schema checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Shorthand for building an [`UpstreamUnavailable`](Self::UpstreamUnavailable).
    pub fn upstream(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Returns the classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmx_market_data::errors::{ErrorClass, MarketDataError};
    ///
    /// let error = MarketDataError::InvalidSymbol("XYZ".to_string());
    /// assert_eq!(error.class(), ErrorClass::UserFacing);
    ///
    /// let error = MarketDataError::upstream("quotes", "HTTP error: 503");
    /// assert_eq!(error.class(), ErrorClass::Transient);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidSymbol(_) | Self::NoDataForDate { .. } | Self::InvalidQuery(_) => {
                ErrorClass::UserFacing
            }

            Self::UpstreamUnavailable { .. } => ErrorClass::Transient,

            Self::DateResolution { .. } | Self::ValidationFailed { .. } => ErrorClass::Fatal,
        }
    }
}
