use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Options-chain query.
///
/// Without a date the live chain is returned; with one, the end-of-day
/// chain for that date (after rolling forward to a trading day).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRequest {
    /// Ticker as typed by the user, e.g. "RY", "ry.to", "XIU.TSX"
    pub symbol: String,

    /// As-of date (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ChainRequest {
    /// Request for the live chain.
    pub fn current(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            date: None,
        }
    }

    /// Request for the end-of-day chain of `date`.
    pub fn historical(symbol: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            date: Some(date),
        }
    }

    /// Build a request from raw host parameters.
    ///
    /// Unknown keys are ignored; `symbol` must be a non-empty string.
    pub fn from_params(params: serde_json::Value) -> Result<Self, MarketDataError> {
        let request: Self = serde_json::from_value(params)
            .map_err(|e| MarketDataError::InvalidQuery(e.to_string()))?;

        if request.symbol.trim().is_empty() {
            return Err(MarketDataError::InvalidQuery(
                "symbol must not be empty".to_string(),
            ));
        }

        Ok(request)
    }
}
