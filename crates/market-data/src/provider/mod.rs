//! Provider registration.
//!
//! The host discovers the provider through [`tmx_provider`], which names the
//! fetchers it serves. The fetchers themselves live in [`crate::fetcher`].

mod capabilities;

pub use capabilities::ProviderCapabilities;

use crate::fetcher::OPTIONS_CHAINS;

pub const PROVIDER_NAME: &str = "tmx";

const WEBSITE: &str = "https://www.tmx.com/";

const DESCRIPTION: &str = "TMX Group Companies
        - Toronto Stock Exchange
        - TSX Venture Exchange
        - TSX Trust
        - Montréal Exchange
        - TSX Alpha Exchange
        - Shorcan
        - CDCC
        - CDS
        - TMX Datalinx
        - Trayport";

/// Registration record handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub website: &'static str,
    pub description: &'static str,
    pub capabilities: ProviderCapabilities,
}

pub fn tmx_provider() -> ProviderInfo {
    ProviderInfo {
        name: PROVIDER_NAME,
        website: WEBSITE,
        description: DESCRIPTION,
        capabilities: ProviderCapabilities {
            fetchers: &[OPTIONS_CHAINS],
            supports_current: true,
            supports_historical: true,
        },
    }
}
