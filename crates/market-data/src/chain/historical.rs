//! End-of-day chain from the historical CSV export.
//!
//! The export has one row per contract. Columns are located by header name,
//! so reordering upstream does not shift values between fields.

use std::sync::Arc;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::coerce::{parse_date, parse_decimal, parse_integer};
use super::finalize_chain;
use crate::calendar::DateNormalizer;
use crate::config::TmxConfig;
use crate::errors::MarketDataError;
use crate::http::{HttpFetch, HttpRequest};
use crate::models::{OptionContractRow, OptionType};
use crate::resolver::SymbolResolver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EodColumn {
    QuoteDate,
    Strike,
    Expiration,
    CallPut,
    Bid,
    Ask,
    BidSize,
    AskSize,
    LastPrice,
    Volume,
    PreviousClose,
    Change,
    Open,
    High,
    Low,
    TotalValue,
    TransactionCount,
    SettlementPrice,
    OpenInterest,
    ImpliedVolatility,
    ContractSymbol,
}

impl EodColumn {
    /// Map a header to its column. Symbol, class, root, underlying and
    /// instrument-type columns are intentionally unmapped.
    fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();

        let column = match key.as_str() {
            "date" => Self::QuoteDate,
            "strikeprice" | "strike" => Self::Strike,
            "expirydate" | "expiry" => Self::Expiration,
            "callput" => Self::CallPut,
            "bidprice" => Self::Bid,
            "askprice" => Self::Ask,
            "bidsize" => Self::BidSize,
            "asksize" => Self::AskSize,
            "lastprice" => Self::LastPrice,
            "volume" => Self::Volume,
            "prevcloseprice" | "previousclose" => Self::PreviousClose,
            "netchange" => Self::Change,
            "openprice" => Self::Open,
            "highprice" => Self::High,
            "lowprice" => Self::Low,
            "totalvalue" => Self::TotalValue,
            "trans" | "transactions" => Self::TransactionCount,
            "settlementprice" => Self::SettlementPrice,
            "openinterest" => Self::OpenInterest,
            "impliedvolatility" => Self::ImpliedVolatility,
            "externalsymbol" => Self::ContractSymbol,
            _ => return None,
        };
        Some(column)
    }
}

/// Parse the export into unsorted rows.
///
/// Rows keep the upstream order and include zero strikes; see
/// [`normalize_eod_rows`]. A body with no data rows parses to an empty
/// vector. A body the CSV reader cannot decode, one missing the strike,
/// expiry or call/put column, or one where no data row parses is an
/// upstream failure.
pub fn parse_eod_records(
    body: &str,
    root: &str,
) -> Result<Vec<OptionContractRow>, MarketDataError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| MarketDataError::upstream("historical", format!("Unreadable export: {}", e)))?
        .clone();
    let columns: Vec<Option<EodColumn>> = headers.iter().map(EodColumn::from_header).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            MarketDataError::upstream("historical", format!("Unreadable export row: {}", e))
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push(record);
    }

    if records.is_empty() {
        return Ok(Vec::new());
    }

    for required in [EodColumn::Strike, EodColumn::Expiration, EodColumn::CallPut] {
        if !columns.contains(&Some(required)) {
            return Err(MarketDataError::upstream(
                "historical",
                format!("Export is missing the {:?} column", required),
            ));
        }
    }

    let rows: Vec<OptionContractRow> = records
        .iter()
        .filter_map(|record| parse_record(record, &columns, root))
        .collect();

    if rows.is_empty() {
        return Err(MarketDataError::upstream(
            "historical",
            format!("None of the {} export rows could be parsed", records.len()),
        ));
    }
    if rows.len() != records.len() {
        warn!(
            "Skipped {} export rows without a valid strike, expiry or call/put flag",
            records.len() - rows.len()
        );
    }
    Ok(rows)
}

fn parse_record(
    record: &StringRecord,
    columns: &[Option<EodColumn>],
    root: &str,
) -> Option<OptionContractRow> {
    let value = |wanted: EodColumn| {
        columns
            .iter()
            .position(|c| *c == Some(wanted))
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
    };

    let strike = parse_decimal(value(EodColumn::Strike))?;
    let expiration = parse_date(value(EodColumn::Expiration))?;
    let option_type = OptionType::from_indicator(value(EodColumn::CallPut))?;

    let mut row = OptionContractRow::new(expiration, strike, option_type);
    row.quote_date = parse_date(value(EodColumn::QuoteDate));
    row.bid = parse_decimal(value(EodColumn::Bid));
    row.ask = parse_decimal(value(EodColumn::Ask));
    row.bid_size = parse_integer(value(EodColumn::BidSize));
    row.ask_size = parse_integer(value(EodColumn::AskSize));
    row.last_price = parse_decimal(value(EodColumn::LastPrice));
    row.volume = parse_integer(value(EodColumn::Volume));
    row.previous_close = parse_decimal(value(EodColumn::PreviousClose));
    row.change = parse_decimal(value(EodColumn::Change));
    row.open = parse_decimal(value(EodColumn::Open));
    row.high = parse_decimal(value(EodColumn::High));
    row.low = parse_decimal(value(EodColumn::Low));
    row.total_value = parse_decimal(value(EodColumn::TotalValue));
    row.transaction_count = parse_integer(value(EodColumn::TransactionCount));
    row.settlement_price = parse_decimal(value(EodColumn::SettlementPrice));
    row.open_interest = parse_integer(value(EodColumn::OpenInterest));

    // Published in percent
    row.implied_volatility =
        parse_decimal(value(EodColumn::ImpliedVolatility)).map(|iv| iv * Decimal::new(1, 2));

    row.days_to_expiration = row
        .quote_date
        .map(|quote_date| (expiration - quote_date).num_days());

    let code: String = value(EodColumn::ContractSymbol)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    row.contract_symbol = if code.is_empty() {
        OptionContractRow::compose_symbol(root, expiration, option_type, strike)
    } else {
        code
    };

    Some(row)
}

/// Sort, stamp the underlying price and finalize parsed export rows.
///
/// The export carries no underlying quote. Every row gets the last price of
/// the row with the greatest chain key in the parsed table (zero strikes
/// included) as a stand-in.
pub fn normalize_eod_rows(mut rows: Vec<OptionContractRow>) -> Vec<OptionContractRow> {
    rows.sort_by_key(OptionContractRow::key);

    let underlying_price = rows.last().and_then(|row| row.last_price);
    for row in &mut rows {
        row.underlying_price = underlying_price;
    }

    finalize_chain(rows)
}

/// Fetches the end-of-day chain for a symbol and date.
pub struct HistoricalChainRetriever {
    http: Arc<dyn HttpFetch>,
    resolver: Arc<dyn SymbolResolver>,
    normalizer: DateNormalizer,
    config: TmxConfig,
}

impl HistoricalChainRetriever {
    pub fn new(
        http: Arc<dyn HttpFetch>,
        resolver: Arc<dyn SymbolResolver>,
        normalizer: DateNormalizer,
        config: TmxConfig,
    ) -> Self {
        Self {
            http,
            resolver,
            normalizer,
            config,
        }
    }

    pub async fn fetch_historical(
        &self,
        raw_symbol: &str,
        requested_date: NaiveDate,
    ) -> Result<Vec<OptionContractRow>, MarketDataError> {
        let root = self.resolver.resolve(raw_symbol).await?;

        let date = self.normalizer.normalize(requested_date)?;
        if date != requested_date {
            info!(
                "{} is not a trading day, using {} for {}",
                requested_date, date, root
            );
        }

        let day = date.format("%Y-%m-%d").to_string();
        let request = HttpRequest::get("historical", self.config.historical_url())
            .query("symbol", root.as_str())
            .query("from", day.as_str())
            .query("to", day.as_str())
            .query("dnld", "1")
            .timeout(self.config.request_timeout);
        let body = self.http.get_text(request).await?;

        let rows = parse_eod_records(&body, &root)?;
        if rows.is_empty() {
            return Err(MarketDataError::NoDataForDate { symbol: root, date });
        }

        let chain = normalize_eod_rows(rows);
        debug!("Parsed {} end-of-day contracts for {} on {}", chain.len(), root, date);
        Ok(chain)
    }
}
