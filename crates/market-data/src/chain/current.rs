//! Live chain from the quotes page.
//!
//! The page renders one table per underlying. Its header has two levels:
//! a group row ("Calls" / "Puts") over per-side labels, with the expiry
//! date and strike columns shared between sides.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::America::Toronto;
use log::{debug, warn};
use scraper::Html;

use super::coerce::{parse_date, parse_decimal, parse_integer};
use super::{days_until, finalize_chain};
use crate::config::TmxConfig;
use crate::errors::MarketDataError;
use crate::html_table::{expand, header_grid, table_rows, tables, TableRows};
use crate::http::{HttpFetch, HttpRequest};
use crate::models::{OptionContractRow, OptionType};
use crate::resolver::SymbolResolver;

/// Wall-clock time at the exchange.
pub fn toronto_now() -> NaiveDateTime {
    Utc::now().with_timezone(&Toronto).naive_local()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuoteField {
    Bid,
    Ask,
    LastPrice,
    Change,
    OpenInterest,
    Volume,
}

impl QuoteField {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("open int") {
            Some(Self::OpenInterest)
        } else if label.contains("bid") && !label.contains("size") {
            Some(Self::Bid)
        } else if label.contains("ask") && !label.contains("size") {
            Some(Self::Ask)
        } else if label.contains("last") {
            Some(Self::LastPrice)
        } else if label.contains("change") {
            Some(Self::Change)
        } else if label.starts_with("vol") {
            Some(Self::Volume)
        } else {
            None
        }
    }

    fn apply(self, row: &mut OptionContractRow, raw: &str) {
        match self {
            Self::Bid => row.bid = parse_decimal(raw),
            Self::Ask => row.ask = parse_decimal(raw),
            Self::LastPrice => row.last_price = parse_decimal(raw),
            Self::Change => row.change = parse_decimal(raw),
            Self::OpenInterest => row.open_interest = parse_integer(raw),
            Self::Volume => row.volume = parse_integer(raw),
        }
    }
}

/// Column positions of one quote table.
#[derive(Debug, Default)]
struct QuoteLayout {
    expiry: usize,
    strike: usize,
    calls: Vec<(QuoteField, usize)>,
    puts: Vec<(QuoteField, usize)>,
}

impl QuoteLayout {
    /// Locate the shared and per-side columns.
    ///
    /// Sides come from the group row when there is one; otherwise columns
    /// left of the strike are calls and columns right of it are puts.
    fn detect(rows: &TableRows) -> Option<Self> {
        let grid = header_grid(&rows.header);
        let labels = grid.last()?;
        let groups = if grid.len() > 1 { grid.first() } else { None };

        let find = |prefix: &str| {
            labels
                .iter()
                .position(|l| l.to_lowercase().starts_with(prefix))
        };
        let expiry = find("expiry")?;
        let strike = find("strike")?;

        let mut layout = Self {
            expiry,
            strike,
            ..Self::default()
        };

        for (idx, label) in labels.iter().enumerate() {
            if idx == expiry || idx == strike {
                continue;
            }
            let Some(field) = QuoteField::from_label(label) else {
                continue;
            };

            let group = groups
                .and_then(|g| g.get(idx))
                .map(|g| g.to_lowercase())
                .unwrap_or_default();
            let side = if group.contains("call") {
                OptionType::Call
            } else if group.contains("put") {
                OptionType::Put
            } else if idx < strike {
                OptionType::Call
            } else {
                OptionType::Put
            };

            match side {
                OptionType::Call => layout.calls.push((field, idx)),
                OptionType::Put => layout.puts.push((field, idx)),
            }
        }

        if layout.calls.is_empty() && layout.puts.is_empty() {
            return None;
        }
        Some(layout)
    }

    fn side(&self, option_type: OptionType) -> &[(QuoteField, usize)] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }
}

/// Parse the first quote table on the page into a chain for `root`.
///
/// A page without a recognizable quote table yields an empty chain.
pub fn parse_quotes_table(html: &str, root: &str, now: NaiveDateTime) -> Vec<OptionContractRow> {
    let document = Html::parse_document(html);

    let Some((rows, layout)) = tables(&document).into_iter().find_map(|table| {
        let rows = table_rows(table)?;
        let layout = QuoteLayout::detect(&rows)?;
        Some((rows, layout))
    }) else {
        warn!("No quote table found for {}", root);
        return Vec::new();
    };

    let mut chain = Vec::with_capacity(rows.body.len() * 2);
    for row in &rows.body {
        let cells = expand(row);

        let expiration = cells.get(layout.expiry).and_then(|c| parse_date(c));
        let strike = cells.get(layout.strike).and_then(|c| parse_decimal(c));
        let (Some(expiration), Some(strike)) = (expiration, strike) else {
            debug!("Skipping quote row without expiry/strike: {:?}", cells);
            continue;
        };

        for option_type in [OptionType::Call, OptionType::Put] {
            let columns = layout.side(option_type);
            if columns.is_empty() {
                continue;
            }

            let mut contract = OptionContractRow::new(expiration, strike, option_type);
            for &(field, idx) in columns {
                if let Some(raw) = cells.get(idx) {
                    field.apply(&mut contract, raw);
                }
            }
            contract.days_to_expiration = Some(days_until(expiration, now));
            contract.contract_symbol =
                OptionContractRow::compose_symbol(root, expiration, option_type, strike);
            chain.push(contract);
        }
    }

    finalize_chain(chain)
}

/// Fetches the live chain for a symbol.
pub struct CurrentChainRetriever {
    http: Arc<dyn HttpFetch>,
    resolver: Arc<dyn SymbolResolver>,
    config: TmxConfig,
    clock: fn() -> NaiveDateTime,
}

impl CurrentChainRetriever {
    pub fn new(
        http: Arc<dyn HttpFetch>,
        resolver: Arc<dyn SymbolResolver>,
        config: TmxConfig,
    ) -> Self {
        Self {
            http,
            resolver,
            config,
            clock: toronto_now,
        }
    }

    /// Replace the exchange-local clock used for days to expiration.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub async fn fetch_current(
        &self,
        raw_symbol: &str,
    ) -> Result<Vec<OptionContractRow>, MarketDataError> {
        let root = self.resolver.resolve(raw_symbol).await?;

        let request = HttpRequest::get("quotes", self.config.quotes_url())
            .query("symbol", format!("{}*", root))
            .timeout(self.config.request_timeout);
        let body = self.http.get_text(request).await?;

        let chain = parse_quotes_table(&body, &root, (self.clock)());
        debug!("Parsed {} live contracts for {}", chain.len(), root);
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::http::testing::{FakeHttp, LISTINGS_HTML, QUOTES_HTML};
    use crate::resolver::ListingResolver;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_one_strike_yields_call_and_put() {
        let chain = parse_quotes_table(QUOTES_HTML, "RY", now());

        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].contract_symbol, "RY240621C100");
        assert_eq!(chain[1].contract_symbol, "RY240621P100");
        assert_eq!(chain[0].option_type, OptionType::Call);
        assert_eq!(chain[1].option_type, OptionType::Put);
    }

    #[test]
    fn test_side_values_are_coerced() {
        let chain = parse_quotes_table(QUOTES_HTML, "RY", now());
        let (call, put) = (&chain[0], &chain[1]);

        assert_eq!(call.expiration, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        assert_eq!(call.strike, dec!(100));
        assert_eq!(call.bid, Some(dec!(4.10)));
        assert_eq!(call.ask, Some(dec!(4.35)));
        assert_eq!(call.last_price, Some(dec!(4.20)));
        assert_eq!(call.change, Some(dec!(0.15)));
        assert_eq!(call.open_interest, Some(1250));
        assert_eq!(call.volume, Some(37));

        assert_eq!(put.bid, Some(dec!(0.85)));
        assert_eq!(put.change, Some(dec!(-0.05)));
        assert_eq!(put.open_interest, Some(980));
        assert_eq!(put.volume, None);
    }

    #[test]
    fn test_days_to_expiration_uses_clock() {
        let chain = parse_quotes_table(QUOTES_HTML, "RY", now());
        assert!(chain.iter().all(|r| r.days_to_expiration == Some(2)));
    }

    #[test]
    fn test_page_without_table_is_empty() {
        assert!(parse_quotes_table("<html><body>No data</body></html>", "RY", now()).is_empty());
    }

    #[test]
    fn test_malformed_header_span_yields_empty_chain() {
        let html = r#"<table>
            <tr><th colspan="18446744073709551615">Calls</th><th rowspan="2">Strike</th></tr>
            <tr><th>Bid price</th></tr>
            <tr><td>1.00</td><td>32.50</td></tr>
        </table>"#;
        assert!(parse_quotes_table(html, "XIU", now()).is_empty());
    }

    #[test]
    fn test_zero_strike_rows_are_dropped() {
        let html = QUOTES_HTML.replace("<td>100.00</td>", "<td>0.00</td>");
        assert!(parse_quotes_table(&html, "RY", now()).is_empty());
    }

    #[test]
    fn test_single_header_row_splits_on_strike() {
        let html = r#"<table>
            <tr><th>Expiry date</th><th>Bid price</th><th>Ask price</th><th>Strike</th><th>Bid price</th><th>Ask price</th></tr>
            <tr><td>2024-07-19</td><td>1.00</td><td>1.10</td><td>32.50</td><td>0.40</td><td>0.45</td></tr>
        </table>"#;
        let chain = parse_quotes_table(html, "XIU", now());

        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].contract_symbol, "XIU240719C32.5");
        assert_eq!(chain[0].bid, Some(dec!(1.00)));
        assert_eq!(chain[1].contract_symbol, "XIU240719P32.5");
        assert_eq!(chain[1].ask, Some(dec!(0.45)));
    }

    #[tokio::test]
    async fn test_fetch_current_queries_root_wildcard() {
        let config = TmxConfig::default();
        let http = Arc::new(
            FakeHttp::new()
                .with_body(config.listings_url(), LISTINGS_HTML)
                .with_body(config.quotes_url(), QUOTES_HTML),
        );
        let resolver = Arc::new(ListingResolver::new(http.clone(), config.clone()));
        let retriever = CurrentChainRetriever::new(http.clone(), resolver, config).with_clock(now);

        let chain = retriever.fetch_current("ry.to").await.unwrap();
        assert_eq!(chain.len(), 2);

        let calls = http.calls_to("quotes");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query_value("symbol"), Some("RY*"));
    }

    #[tokio::test]
    async fn test_fetch_current_surfaces_upstream_errors() {
        let config = TmxConfig::default();
        let http = Arc::new(
            FakeHttp::new()
                .with_body(config.listings_url(), LISTINGS_HTML)
                .with_status(config.quotes_url(), 502),
        );
        let resolver = Arc::new(ListingResolver::new(http.clone(), config.clone()));
        let retriever = CurrentChainRetriever::new(http, resolver, config);

        let err = retriever.fetch_current("RY").await.unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamUnavailable { .. }));
    }
}
