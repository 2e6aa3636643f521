//! Search the sales history from the terminal.
//!
//! Runs the same search and latest-per-item reduction as the web page.

use snackfinder_core::StoreSelection;
use snackfinder_server::config::{SearchConfig, database_url_from_env};
use snackfinder_server::db;
use snackfinder_server::search::{LatestSale, SearchOutcome, SearchService};

/// Print the latest sale of each item matching `query`.
///
/// An empty `stores` list searches every storefront.
///
/// # Errors
///
/// Returns an error for an unknown storefront name, a missing database URL,
/// or a failed search.
pub async fn run(query: &str, stores: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let selection = if stores.is_empty() {
        StoreSelection::all()
    } else {
        StoreSelection::parse_names(stores.iter().map(String::as_str))?
    };

    let database_url = database_url_from_env()?;
    let pool = db::create_pool(&database_url).await?;

    // The terminal has no keystroke traffic to debounce, so any non-blank query runs
    let config = SearchConfig {
        min_query_len: 1,
        ..SearchConfig::default()
    };
    let search = SearchService::new(pool, &config);

    match search.latest(query, selection).await {
        SearchOutcome::Idle => Err("Search query is empty".into()),
        SearchOutcome::Failed => Err("Error searching for item".into()),
        SearchOutcome::NotFound => {
            print_lines(&["Item not found".to_string()]);
            Ok(())
        }
        SearchOutcome::Found(sales) => {
            print_lines(&sales.iter().map(format_sale).collect::<Vec<_>>());
            Ok(())
        }
    }
}

fn format_sale(sale: &LatestSale) -> String {
    format!(
        "{}  {}  Last Purchased: {}  Store: {}",
        sale.name, sale.price, sale.last_purchased, sale.store
    )
}

#[allow(clippy::print_stdout)]
fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sale() {
        let sale = LatestSale {
            id: 3,
            name: "Skittles".to_string(),
            price: "$1.00".to_string(),
            last_purchased: "March 9, 2025, 09:15 AM".to_string(),
            store: "ug".to_string(),
        };

        assert_eq!(
            format_sale(&sale),
            "Skittles  $1.00  Last Purchased: March 9, 2025, 09:15 AM  Store: ug"
        );
    }
}
