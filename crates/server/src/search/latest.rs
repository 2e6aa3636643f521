//! Latest-sale-per-item reduction.
//!
//! A search returns every matching sale. The page only wants one card per
//! item per storefront, showing the most recent positively-priced sale.

use std::collections::HashMap;

use snackfinder_core::{StoreSelection, Storefront, UNKNOWN_STORE_KEY};

use crate::models::LineItem;

/// Display data for one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestSale {
    pub id: i32,
    pub name: String,
    /// Formatted price, e.g. "$1.25".
    pub price: String,
    /// Formatted last-purchased time.
    pub last_purchased: String,
    /// Storefront as recorded on the order, or "Unknown".
    pub store: String,
}

impl From<&LineItem> for LatestSale {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.price.display(),
            last_purchased: item.created.display(),
            store: item
                .storefront
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
        }
    }
}

/// Grouping key for a sale: lowercase name and the resolved storefront.
///
/// The storefront is resolved the same way the store filter resolves it, so
/// `"Snaxa"` and `"snaxa "` share a group. Unrecognised values group as
/// `unknown`.
#[must_use]
pub fn group_key(item: &LineItem) -> String {
    let store = Storefront::from_column(item.storefront.as_deref())
        .map_or(UNKNOWN_STORE_KEY, Storefront::key);
    format!("{}_{store}", item.name.to_lowercase())
}

/// Keep the most recent sale for each (name, storefront) pair.
///
/// Sales from storefronts outside `selection` and sales with a non-positive
/// price are skipped. Within a group a sale replaces the kept one only if it
/// is strictly newer. Groups come out in the order they were first seen, so
/// newest-first input gives newest-first output.
#[must_use]
pub fn latest_per_item(items: &[LineItem], selection: StoreSelection) -> Vec<&LineItem> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<&LineItem> = Vec::new();

    for item in items {
        if !selection.admits(item.storefront.as_deref()) || !item.price.is_positive() {
            continue;
        }

        let key = group_key(item);
        match slots.get(&key).copied() {
            Some(slot) => {
                if let Some(current) = kept.get_mut(slot)
                    && current.created < item.created
                {
                    *current = item;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(item);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use snackfinder_core::{LineItemId, Price, SaleTimestamp};

    use super::*;

    fn sale(id: i32, name: &str, cents: i64, millis: i64, store: Option<&str>) -> LineItem {
        LineItem {
            id: LineItemId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
            created: SaleTimestamp::from_millis(millis),
            item_id: None,
            storefront: store.map(String::from),
        }
    }

    fn ids(sales: &[&LineItem]) -> Vec<i32> {
        sales.iter().map(|s| s.id.as_i32()).collect()
    }

    #[test]
    fn test_keeps_latest_per_name_and_store() {
        let items = vec![
            sale(3, "Doritos", 200, 300, Some("snaxa")),
            sale(2, "Doritos", 175, 200, Some("snaxa")),
            sale(1, "Doritos", 150, 100, Some("mug")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![3, 1]);
    }

    #[test]
    fn test_grouping_ignores_case() {
        let items = vec![
            sale(2, "DORITOS", 200, 200, Some("Snaxa")),
            sale(1, "doritos", 175, 100, Some("snaxa")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![2]);
    }

    #[test]
    fn test_newer_sale_replaces_in_place() {
        // Out-of-order input: the older sale is seen first but the newer one wins,
        // and the group keeps its original position.
        let items = vec![
            sale(1, "Cheetos", 100, 100, Some("ug")),
            sale(2, "Fritos", 100, 150, Some("ug")),
            sale(3, "Cheetos", 125, 500, Some("ug")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![3, 2]);
    }

    #[test]
    fn test_storefront_spelling_does_not_split_groups() {
        let items = vec![
            sale(3, "Doritos", 200, 300, Some("snaxa ")),
            sale(2, "Doritos", 175, 200, Some("SNAXA")),
            sale(1, "Doritos", 150, 100, Some("snaxa")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![3]);
        let stores: Vec<String> = latest.into_iter().map(|s| LatestSale::from(s).store).collect();
        assert_eq!(stores, vec!["snaxa"]);
    }

    #[test]
    fn test_padded_storefront_respects_selection() {
        let items = vec![sale(1, "Doritos", 200, 300, Some(" Mug "))];

        let mut selection = StoreSelection::all();
        selection.set(Storefront::Mug, false);
        assert!(latest_per_item(&items, selection).is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let items = vec![
            sale(1, "Skittles", 100, 100, Some("vittles")),
            sale(2, "Skittles", 110, 100, Some("vittles")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![1]);
    }

    #[test]
    fn test_skips_non_positive_prices() {
        let items = vec![
            sale(3, "Water", 0, 300, Some("midnight")),
            sale(2, "Water", -100, 200, Some("midnight")),
            sale(1, "Water", 100, 100, Some("midnight")),
        ];

        let latest = latest_per_item(&items, StoreSelection::all());
        assert_eq!(ids(&latest), vec![1]);
    }

    #[test]
    fn test_skips_deselected_and_unknown_stores() {
        let items = vec![
            sale(4, "Gum", 100, 400, None),
            sale(3, "Gum", 100, 300, Some("warehouse")),
            sale(2, "Gum", 100, 200, Some("hilltoss")),
            sale(1, "Gum", 100, 100, Some("snaxa")),
        ];

        let mut selection = StoreSelection::all();
        selection.set(Storefront::Hilltoss, false);

        let latest = latest_per_item(&items, selection);
        assert_eq!(ids(&latest), vec![1]);
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        let items = vec![sale(1, "Gum", 100, 100, Some("snaxa"))];
        assert!(latest_per_item(&items, StoreSelection::none()).is_empty());
    }

    #[test]
    fn test_group_key() {
        assert_eq!(
            group_key(&sale(1, "Kit Kat", 100, 1, Some("MUG"))),
            "kit kat_mug"
        );
        assert_eq!(group_key(&sale(1, "Kit Kat", 100, 1, None)), "kit kat_unknown");
        assert_eq!(group_key(&sale(1, "Kit Kat", 100, 1, Some(""))), "kit kat_unknown");
        assert_eq!(group_key(&sale(1, "Kit Kat", 100, 1, Some(" Ug "))), "kit kat_ug");
        assert_eq!(
            group_key(&sale(1, "Kit Kat", 100, 1, Some("warehouse"))),
            "kit kat_unknown"
        );
    }

    #[test]
    fn test_latest_sale_display_fields() {
        let item = sale(7, "Twix", 150, 0, Some("Midnight"));
        let card = LatestSale::from(&item);
        assert_eq!(card.price, "$1.50");
        assert_eq!(card.store, "Midnight");
        assert_eq!(card.last_purchased, "January 1, 1970, 12:00 AM");

        let orphan = sale(8, "Twix", 150, 0, None);
        assert_eq!(LatestSale::from(&orphan).store, "Unknown");
    }
}
