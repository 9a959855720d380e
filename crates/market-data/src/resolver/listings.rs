//! Loading the options listing directory.
//!
//! The listings page is one or more HTML tables with (at least) an
//! "Option symbol" and an "Underlying symbol" column. Unit trusts are
//! written with a trailing " u" ("REI u") and index products carry a dash
//! placeholder instead of an underlying.

use log::{debug, warn};
use scraper::Html;

use crate::config::TmxConfig;
use crate::errors::MarketDataError;
use crate::html_table::{expand, table_rows, tables};
use crate::http::{HttpFetch, HttpRequest};
use crate::models::{Listing, ListingDirectory};

/// Parse every listings table on the page into a directory.
pub fn parse_listings_page(html: &str) -> ListingDirectory {
    let document = Html::parse_document(html);
    let mut listings = Vec::new();

    for table in tables(&document) {
        let Some(rows) = table_rows(table) else {
            continue;
        };
        let Some(header) = rows.header.last() else {
            continue;
        };

        let labels: Vec<String> = expand(header).iter().map(|l| l.to_lowercase()).collect();
        let root_idx = labels.iter().position(|l| l == "option symbol");
        let underlying_idx = labels.iter().position(|l| l == "underlying symbol");
        let name_idx = labels.iter().position(|l| l.contains("name"));

        let (Some(root_idx), Some(underlying_idx)) = (root_idx, underlying_idx) else {
            debug!("Skipping table without option/underlying symbol columns");
            continue;
        };

        for row in &rows.body {
            // Footer and note rows span the whole table
            if row.len() < header.len() {
                continue;
            }

            let cells = expand(row);
            let (Some(root), Some(underlying)) = (cells.get(root_idx), cells.get(underlying_idx))
            else {
                continue;
            };

            let option_root = root.trim().to_uppercase();
            if option_root.is_empty() {
                continue;
            }

            listings.push(Listing {
                option_root,
                underlying_symbol: normalize_underlying(underlying),
                underlying_name: name_idx
                    .and_then(|i| cells.get(i))
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
            });
        }
    }

    ListingDirectory::from_listings(listings)
}

/// Fetch and parse the listings page.
///
/// A page that yields no listings is reported as an upstream failure so an
/// empty directory is never cached.
pub async fn fetch_listings(
    http: &dyn HttpFetch,
    config: &TmxConfig,
) -> Result<ListingDirectory, MarketDataError> {
    let request =
        HttpRequest::get("listings", config.listings_url()).timeout(config.request_timeout);
    let body = http.get_text(request).await?;

    let directory = parse_listings_page(&body);
    if directory.is_empty() {
        warn!("Listings page returned {} bytes but no listings", body.len());
        return Err(MarketDataError::upstream(
            "listings",
            "No option listings found on the listings page",
        ));
    }

    Ok(directory)
}

fn normalize_underlying(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().all(|c| matches!(c, '-' | '–' | '—')) {
        return String::new();
    }
    trimmed.replace(" u", ".UN").to_uppercase()
}
