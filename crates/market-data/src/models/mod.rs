//! Market data models
//!
//! This module contains the core data types for options-chain operations:
//! - `contract` - One chain row (OptionContractRow) and the OptionType enum
//! - `request` - The chain query (ChainRequest)
//! - `chain_data` - Standardized output row for the host (OptionsChainData)
//! - `listing` - Directory of option roots (ListingDirectory)

mod chain_data;
mod contract;
mod listing;
mod request;

pub use chain_data::OptionsChainData;
pub use contract::{ChainKey, OptionContractRow, OptionType};
pub use listing::{Listing, ListingDirectory};
pub use request::ChainRequest;
