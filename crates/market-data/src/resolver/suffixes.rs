//! Exchange suffix handling for user-supplied tickers.

/// Market qualifiers users append to Toronto listings.
///
/// Longest first, so ".TSX" is not mistaken for something ending in ".TO".
pub const TMX_EXCHANGE_SUFFIXES: &[&str] = &[".TSX", ".TO"];

/// Strip a known Toronto exchange suffix.
///
/// Uses a whitelist so share classes like BBD.B or CTC.A survive.
pub fn strip_exchange_suffix(symbol: &str) -> &str {
    for suffix in TMX_EXCHANGE_SUFFIXES {
        if let Some(stripped) = symbol.strip_suffix(suffix) {
            return stripped;
        }
    }
    symbol
}

/// Trim, upper-case and strip the exchange suffix.
pub fn clean_symbol(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    strip_exchange_suffix(&upper).to_string()
}
