//! Options-chain retrieval: the live quote table and the end-of-day export.
//!
//! Both retrievers split into a pure parser (`raw text -> Vec<OptionContractRow>`)
//! and a thin async wrapper that resolves the symbol and issues one GET.
//! Parsers finish with [`finalize_chain`], so every chain they return has
//! unique, ascending `(expiration, strike, option_type)` keys and no
//! zero-strike rows.

pub mod coerce;
mod current;
mod historical;

pub use current::{parse_quotes_table, toronto_now, CurrentChainRetriever};
pub use historical::{normalize_eod_rows, parse_eod_records, HistoricalChainRetriever};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use rust_decimal::Decimal;

use crate::models::OptionContractRow;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Drop zero strikes, sort by chain key and keep the first row per key.
pub fn finalize_chain(mut rows: Vec<OptionContractRow>) -> Vec<OptionContractRow> {
    let parsed = rows.len();

    rows.retain(|row| row.strike != Decimal::ZERO);
    rows.sort_by_key(OptionContractRow::key);
    rows.dedup_by_key(|row| row.key());

    if rows.len() != parsed {
        debug!("Chain reduced from {} to {} rows", parsed, rows.len());
    }
    rows
}

/// Whole days from `now` to the start of `expiration`, plus one.
///
/// An option expiring today therefore reports 0 once the session is
/// underway, and 1 at exactly midnight.
pub fn days_until(expiration: NaiveDate, now: NaiveDateTime) -> i64 {
    let seconds = (expiration.and_time(NaiveTime::MIN) - now).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY) + 1
}
