//! Vending storefronts and the user's store filter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grouping key used for sales whose storefront is missing or unrecognised.
pub const UNKNOWN_STORE_KEY: &str = "unknown";

/// Error parsing a storefront name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown storefront: {0}")]
pub struct StorefrontError(pub String);

/// A physical vending location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storefront {
    Snaxa,
    Vittles,
    Mug,
    Midnight,
    Ug,
    Hilltoss,
}

impl Storefront {
    /// Every storefront, in the order the filter checkboxes are shown.
    pub const ALL: [Self; 6] = [
        Self::Snaxa,
        Self::Vittles,
        Self::Mug,
        Self::Midnight,
        Self::Ug,
        Self::Hilltoss,
    ];

    /// The lowercase key used in query strings and grouping keys.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Snaxa => "snaxa",
            Self::Vittles => "vittles",
            Self::Mug => "mug",
            Self::Midnight => "midnight",
            Self::Ug => "ug",
            Self::Hilltoss => "hilltoss",
        }
    }

    /// Capitalized label for the filter checkboxes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Snaxa => "Snaxa",
            Self::Vittles => "Vittles",
            Self::Mug => "Mug",
            Self::Midnight => "Midnight",
            Self::Ug => "Ug",
            Self::Hilltoss => "Hilltoss",
        }
    }

    /// Resolve the free-text `orders.storefront` column.
    ///
    /// Matching is case-insensitive. Returns `None` for missing or
    /// unrecognised values.
    #[must_use]
    pub fn from_column(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Storefront {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|store| store.key() == lower)
            .ok_or_else(|| StorefrontError(s.to_string()))
    }
}

/// The set of storefronts a search is filtered to.
///
/// Defaults to every storefront. There is no way to select the unknown
/// storefront, so sales without a recognised location never pass the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreSelection(u8);

impl StoreSelection {
    /// Select every storefront.
    #[must_use]
    pub fn all() -> Self {
        Storefront::ALL.into_iter().collect()
    }

    /// Select no storefronts.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Whether `store` is selected.
    #[must_use]
    pub const fn contains(&self, store: Storefront) -> bool {
        self.0 & store.bit() != 0
    }

    /// Select or deselect `store`.
    pub const fn set(&mut self, store: Storefront, selected: bool) {
        if selected {
            self.0 |= store.bit();
        } else {
            self.0 &= !store.bit();
        }
    }

    /// Whether a sale from the given `orders.storefront` value passes the filter.
    #[must_use]
    pub fn admits(&self, storefront: Option<&str>) -> bool {
        Storefront::from_column(storefront).is_some_and(|store| self.contains(store))
    }

    /// Whether no storefront is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the selected storefronts in display order.
    pub fn iter(&self) -> impl Iterator<Item = Storefront> + '_ {
        Storefront::ALL
            .into_iter()
            .filter(|store| self.contains(*store))
    }

    /// Build a selection from storefront names.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` for the first name that isn't a known storefront.
    pub fn parse_names<'a, I>(names: I) -> Result<Self, StorefrontError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(str::parse::<Storefront>)
            .collect()
    }
}

impl Default for StoreSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Storefront> for StoreSelection {
    fn from_iter<T: IntoIterator<Item = Storefront>>(iter: T) -> Self {
        let mut selection = Self::none();
        for store in iter {
            selection.set(store, true);
        }
        selection
    }
}
