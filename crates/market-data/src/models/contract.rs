use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Call or put.
///
/// Declaration order matters: chains sort calls before puts for the same
/// expiration and strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Single-letter code used in contract symbols.
    pub fn code(&self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }

    /// Map the end-of-day export's call/put flag (`0` = call, `1` = put).
    pub fn from_indicator(value: &str) -> Option<Self> {
        match value.trim() {
            "0" | "0.0" => Some(Self::Call),
            "1" | "1.0" => Some(Self::Put),
            _ => None,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort and uniqueness key of a chain row.
pub type ChainKey = (NaiveDate, Decimal, OptionType);

/// One contract of an options chain.
///
/// Rows from the live quote table leave the historical-only fields empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionContractRow {
    /// Contract code, e.g. "RY240621C100"
    pub contract_symbol: String,

    pub expiration: NaiveDate,

    pub strike: Decimal,

    pub option_type: OptionType,

    /// Days to expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_to_expiration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,

    /// Trading date of an end-of-day row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_price: Option<Decimal>,

    /// As a fraction (0.25 == 25%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<Decimal>,
}

impl OptionContractRow {
    /// Create a row with only its key fields set.
    pub fn new(expiration: NaiveDate, strike: Decimal, option_type: OptionType) -> Self {
        Self {
            contract_symbol: String::new(),
            expiration,
            strike,
            option_type,
            days_to_expiration: None,
            bid: None,
            ask: None,
            last_price: None,
            change: None,
            open_interest: None,
            volume: None,
            quote_date: None,
            bid_size: None,
            ask_size: None,
            previous_close: None,
            open: None,
            high: None,
            low: None,
            total_value: None,
            transaction_count: None,
            settlement_price: None,
            implied_volatility: None,
            underlying_price: None,
        }
    }

    pub fn key(&self) -> ChainKey {
        (self.expiration, self.strike, self.option_type)
    }

    /// Build the contract code for a live-quote row:
    /// root + `YYMMDD` + `C`/`P` + strike without trailing zeros.
    pub fn compose_symbol(
        root: &str,
        expiration: NaiveDate,
        option_type: OptionType,
        strike: Decimal,
    ) -> String {
        format!(
            "{}{}{}{}",
            root,
            expiration.format("%y%m%d"),
            option_type.code(),
            strike.normalize()
        )
    }
}
