//! Directory of every equity with listed options on the venue.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the options listing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Symbol the options trade under, e.g. "RY" or "REI"
    pub option_root: String,

    /// Symbol of the underlying equity, e.g. "REI.UN"; may be empty
    pub underlying_symbol: String,

    /// Name of the underlying instrument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_name: Option<String>,
}

/// Option-root → listing map. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct ListingDirectory {
    listings: BTreeMap<String, Listing>,
}

impl ListingDirectory {
    /// Build a directory, keeping the first row seen for each option root.
    pub fn from_listings(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut map = BTreeMap::new();
        for listing in listings {
            if listing.option_root.is_empty() {
                continue;
            }
            map.entry(listing.option_root.clone()).or_insert(listing);
        }
        Self { listings: map }
    }

    pub fn get(&self, option_root: &str) -> Option<&Listing> {
        self.listings.get(option_root)
    }

    pub fn contains(&self, option_root: &str) -> bool {
        self.listings.contains_key(option_root)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    /// Listings whose underlying symbol contains `fragment`.
    pub fn matching_underlying<'a>(
        &'a self,
        fragment: &'a str,
    ) -> impl Iterator<Item = &'a Listing> {
        self.listings
            .values()
            .filter(move |l| l.underlying_symbol.contains(fragment))
    }
}
