//! Lenient cell coercion for scraped and exported values.
//!
//! Upstream cells use thousands separators, explicit `+` signs and dash
//! placeholders for "no value". Anything unparseable becomes `None`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const EMPTY_MARKERS: &[&str] = &["", "-", "--", "–", "––", "—", "n/a", "na", "nan", "none"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

fn cleaned(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if EMPTY_MARKERS
        .iter()
        .any(|m| trimmed.eq_ignore_ascii_case(m))
    {
        return None;
    }

    let value: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%' | '+' | ' ' | '\u{a0}'))
        .collect();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let value = cleaned(raw)?;
    Decimal::from_str(&value)
        .or_else(|_| Decimal::from_scientific(&value))
        .ok()
}

/// Integers may arrive as "1,250" or "1250.0".
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = cleaned(raw)?;
    value
        .parse::<i64>()
        .ok()
        .or_else(|| Decimal::from_str(&value).ok()?.trunc().to_i64())
}

/// Dates, ignoring a trailing "(Weekly)" style annotation.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.split('(').next()?.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
