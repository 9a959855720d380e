//! Symbol resolution for the options provider.
//!
//! Converts a user ticker (possibly exchange-suffixed) into the option root
//! the venue lists it under.
//!
//! # Resolution
//!
//! ```text
//! "rei.un.to"
//!      │  clean_symbol: trim, upper-case, strip .TO / .TSX
//!      ▼
//!  "REI.UN"
//!      │  unique underlying match with a different root?
//!      ▼
//!   "REI"
//!      │  listed option root?
//!      ▼
//!   Ok("REI")  or  Err(InvalidSymbol)
//! ```
//!
//! The listings directory behind the lookup is fetched once and held in a
//! [`ListingsCache`] until its TTL runs out or it is invalidated.

mod cache;
mod listing_resolver;
mod listings;
mod suffixes;
mod traits;

pub use cache::ListingsCache;
pub use listing_resolver::{resolve_in_directory, ListingResolver};
pub use listings::{fetch_listings, parse_listings_page};
pub use suffixes::{clean_symbol, strip_exchange_suffix, TMX_EXCHANGE_SUFFIXES};
pub use traits::SymbolResolver;
