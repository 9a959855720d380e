//! In-memory [`HttpFetch`] and captured page fixtures for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::{HttpFetch, HttpRequest};
use crate::errors::MarketDataError;

pub(crate) const LISTINGS_HTML: &str = r#"
<html><body>
<table class="options-list">
  <thead>
    <tr><th>Name of underlying instrument</th><th>Option symbol</th><th>Underlying symbol</th></tr>
  </thead>
  <tbody>
    <tr><td>Bombardier Inc., Cl. B</td><td>BBD</td><td>BBD.B</td></tr>
    <tr><td>RioCan Real Estate Investment Trust</td><td>REI</td><td>REI u</td></tr>
    <tr><td>Royal Bank of Canada</td><td>RY</td><td>RY</td></tr>
    <tr><td>Toronto-Dominion Bank (The)</td><td>TD</td><td>TD</td></tr>
    <tr><td>iShares S&amp;P/TSX 60 Index ETF</td><td>XIU</td><td>XIU</td></tr>
    <tr><td>Share price index futures</td><td>SXF</td><td>––</td></tr>
    <tr><td colspan="3">Last update: 2024-06-20</td></tr>
  </tbody>
</table>
</body></html>
"#;

/// One expiration (2024-06-21, weekly), one strike (100).
pub(crate) const QUOTES_HTML: &str = r#"
<html><body>
<table class="quotes">
  <thead>
    <tr><th></th><th colspan="6">Calls</th><th></th><th colspan="6">Puts</th></tr>
    <tr>
      <th>Expiry date</th>
      <th>Bid price</th><th>Ask price</th><th>Last Price</th><th>Net change</th><th>Open int.</th><th>Vol.</th>
      <th>Strike</th>
      <th>Bid price</th><th>Ask price</th><th>Last Price</th><th>Net change</th><th>Open int.</th><th>Vol.</th>
    </tr>
  </thead>
  <tbody>
    <tr>
      <td>2024-06-21 (Weekly)</td>
      <td>4.10</td><td>4.35</td><td>4.20</td><td>+0.15</td><td>1,250</td><td>37</td>
      <td>100.00</td>
      <td>0.85</td><td>0.95</td><td>0.90</td><td>-0.05</td><td>980</td><td>-</td>
    </tr>
  </tbody>
</table>
</body></html>
"#;

pub(crate) const EOD_CSV_HEADER: &str = "Date,Symbol,Class Symbol,Root Symbol,Underlying Symbol,Instrument Type,Strike Price,Expiry Date,Call/Put,Bid Price,Ask Price,Bid Size,Ask Size,Last Price,Volume,Prev. Close Price,Net Change,Open Price,High Price,Low Price,Total Value,# Trans.,Settlement Price,Open Interest,Implied Volatility,External Symbol";

pub(crate) fn eod_csv(rows: &[&str]) -> String {
    let mut csv = String::from(EOD_CSV_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    csv
}

#[derive(Clone, Debug)]
pub(crate) enum FakeResponse {
    Body(String),
    Status(u16),
}

/// Serves canned bodies keyed by URL (query ignored) and records every call.
#[derive(Default)]
pub(crate) struct FakeHttp {
    routes: HashMap<String, FakeResponse>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl FakeHttp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .insert(url.into(), FakeResponse::Body(body.into()));
        self
    }

    pub(crate) fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.routes.insert(url.into(), FakeResponse::Status(status));
        self
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, endpoint: &str) -> Vec<HttpRequest> {
        self.calls()
            .into_iter()
            .filter(|r| r.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl HttpFetch for FakeHttp {
    async fn get_text(&self, request: HttpRequest) -> Result<String, MarketDataError> {
        self.calls.lock().unwrap().push(request.clone());
        match self.routes.get(&request.url) {
            Some(FakeResponse::Body(body)) => Ok(body.clone()),
            Some(FakeResponse::Status(status)) => Err(MarketDataError::upstream(
                request.endpoint,
                format!("HTTP error: {}", status),
            )),
            None => Err(MarketDataError::upstream(
                request.endpoint,
                format!("no route for {}", request.url),
            )),
        }
    }
}
