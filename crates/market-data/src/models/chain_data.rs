use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::contract::{OptionContractRow, OptionType};

/// Standardized options-chain row handed to the host application.
///
/// Field names follow the host's options-chain schema; the venue's own
/// names (last price, bid, previous close, ...) are mapped in
/// [`From<OptionContractRow>`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionsChainData {
    pub contract_symbol: String,

    /// End-of-day date, set for historical chains only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eod_date: Option<NaiveDate>,

    pub expiration: NaiveDate,

    /// Days to expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dte: Option<i64>,

    pub strike: Decimal,

    pub option_type: OptionType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,

    /// Last traded price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_close: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_bid: Option<Decimal>,

    /// Lot size for the bid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_ask: Option<Decimal>,

    /// Lot size for the ask
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,

    /// Number of transactions for the contract
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<Decimal>,
}

impl From<OptionContractRow> for OptionsChainData {
    fn from(row: OptionContractRow) -> Self {
        Self {
            contract_symbol: row.contract_symbol,
            eod_date: row.quote_date,
            expiration: row.expiration,
            dte: row.days_to_expiration,
            strike: row.strike,
            option_type: row.option_type,
            open_interest: row.open_interest,
            volume: row.volume,
            close: row.last_price,
            change: row.change,
            prev_close: row.previous_close,
            open: row.open,
            high: row.high,
            low: row.low,
            close_bid: row.bid,
            bid_size: row.bid_size,
            close_ask: row.ask,
            ask_size: row.ask_size,
            total_value: row.total_value,
            transactions: row.transaction_count,
            settlement_price: row.settlement_price,
            implied_volatility: row.implied_volatility,
            underlying_price: row.underlying_price,
        }
    }
}
