use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use serde_json::json;
use tmx_market_data::{Fetcher, TmxConfig, TmxOptionsChainsFetcher};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Print the options chain for a Montréal Exchange listed symbol as JSON.
#[derive(Debug, Parser)]
#[command(name = "tmx-chains", version)]
pub struct Args {
    /// Ticker, e.g. RY, RY.TO or REI.UN
    pub symbol: String,

    /// End-of-day chain for this date (YYYY-MM-DD); live chain when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Log to stderr; `TMX_LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let log_format = std::env::var("TMX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Load `.env`, install logging, then read the provider configuration so
/// warnings about bad settings reach the subscriber.
pub fn startup() -> TmxConfig {
    startup_with(|key| std::env::var(key).ok())
}

pub fn startup_with<F>(lookup: F) -> TmxConfig
where
    F: Fn(&str) -> Option<String>,
{
    dotenvy::dotenv().ok();
    init_tracing();
    TmxConfig::from_lookup(lookup)
}

/// Build the query parameters the host would send.
pub fn params(args: &Args) -> serde_json::Value {
    match args.date {
        Some(date) => json!({ "symbol": args.symbol, "date": date }),
        None => json!({ "symbol": args.symbol }),
    }
}

pub async fn run(args: &Args, config: TmxConfig) -> anyhow::Result<String> {
    let fetcher = TmxOptionsChainsFetcher::from_config(config)?;

    let rows = fetcher
        .fetch_data(params(args))
        .await
        .with_context(|| format!("Failed to fetch options chain for {}", args.symbol))?;
    tracing::info!("Fetched {} contracts for {}", rows.len(), args.symbol);

    let output = if args.pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    Ok(output)
}
