//! Search page and HTMX results fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use tracing::instrument;

use snackfinder_core::{StoreSelection, Storefront};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::search_rate_limiter;
use crate::search::SearchOutcome;
use crate::state::AppState;

/// Parsed search query string.
///
/// The form sends `q`, one `store=<key>` per checked box, and a hidden
/// `filtered=1`. Links without `filtered` (e.g. a bare `/?q=chips`) search
/// every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub selection: StoreSelection,
}

impl SearchParams {
    /// Parse the raw query pairs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if a `store` value isn't a known storefront.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut q = String::new();
        let mut filtered = false;
        let mut stores = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "q" => q.clone_from(value),
                "store" => stores.push(value.as_str()),
                "filtered" => filtered = true,
                _ => {}
            }
        }

        let selection = if filtered {
            StoreSelection::parse_names(stores).map_err(|e| AppError::BadRequest(e.to_string()))?
        } else {
            StoreSelection::all()
        };

        Ok(Self { q, selection })
    }
}

/// One store checkbox on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreToggle {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

fn store_toggles(selection: StoreSelection) -> Vec<StoreToggle> {
    Storefront::ALL
        .into_iter()
        .map(|store| StoreToggle {
            key: store.key(),
            label: store.label(),
            checked: selection.contains(store),
        })
        .collect()
}

/// Results fragment template (HTMX swap target).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub outcome: SearchOutcome,
}

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchPageTemplate {
    pub query: String,
    pub stores: Vec<StoreToggle>,
    pub outcome: SearchOutcome,
}

/// Full search page.
///
/// Renders results server-side when the query string carries one, so the
/// page works without JavaScript.
#[instrument(skip(state, pairs))]
pub async fn search_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<SearchPageTemplate> {
    let params = SearchParams::from_pairs(&pairs)?;
    let outcome = run_search(&state, &params).await;

    Ok(SearchPageTemplate {
        stores: store_toggles(params.selection),
        query: params.q,
        outcome,
    })
}

/// Search results fragment (HTMX).
#[instrument(skip(state, pairs))]
pub async fn results(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<SearchResultsTemplate> {
    let params = SearchParams::from_pairs(&pairs)?;
    let outcome = run_search(&state, &params).await;

    Ok(SearchResultsTemplate { outcome })
}

async fn run_search(state: &AppState, params: &SearchParams) -> SearchOutcome {
    if state.search().is_searchable(&params.q) {
        let stores = params
            .selection
            .iter()
            .map(Storefront::key)
            .collect::<Vec<_>>()
            .join(",");
        let data = [("query", params.q.trim()), ("stores", stores.as_str())];
        add_breadcrumb("search", "Snack search", Some(data.as_slice()));
    }

    state.search().latest(&params.q, params.selection).await
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    // The page searches on load when `q` is set, so it shares the fragment's limit
    Router::new()
        .route("/", get(search_page))
        .route("/search/results", get(results))
        .route_layer(search_rate_limiter())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::search::LatestSale;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_unfiltered_selects_all_stores() {
        let params = SearchParams::from_pairs(&pairs(&[("q", "chips")])).unwrap();
        assert_eq!(params.q, "chips");
        assert_eq!(params.selection, StoreSelection::all());
    }

    #[test]
    fn test_filtered_selects_listed_stores() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("q", "chips"),
            ("store", "snaxa"),
            ("store", "Mug"),
            ("filtered", "1"),
        ]))
        .unwrap();

        let selected: Vec<_> = params.selection.iter().collect();
        assert_eq!(selected, vec![Storefront::Snaxa, Storefront::Mug]);
    }

    #[test]
    fn test_filtered_without_stores_selects_none() {
        let params = SearchParams::from_pairs(&pairs(&[("q", "chips"), ("filtered", "1")])).unwrap();
        assert!(params.selection.is_empty());
    }

    #[test]
    fn test_unknown_store_is_bad_request() {
        let err = SearchParams::from_pairs(&pairs(&[("store", "warehouse"), ("filtered", "1")]))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_store_toggles_follow_selection() {
        let mut selection = StoreSelection::all();
        selection.set(Storefront::Ug, false);

        let toggles = store_toggles(selection);
        assert_eq!(toggles.len(), Storefront::ALL.len());
        assert!(toggles.iter().all(|t| t.checked == (t.key != "ug")));
    }

    #[test]
    fn test_results_fragment_renders_cards() {
        let html = SearchResultsTemplate {
            outcome: SearchOutcome::Found(vec![LatestSale {
                id: 1,
                name: "Hot Cheetos".to_string(),
                price: "$1.25".to_string(),
                last_purchased: "October 3, 2024, 02:05 PM".to_string(),
                store: "snaxa".to_string(),
            }]),
        }
        .render()
        .unwrap();

        assert!(html.contains("Hot Cheetos"));
        assert!(html.contains("$1.25"));
        assert!(html.contains("Last Purchased: October 3, 2024, 02:05 PM"));
        assert!(html.contains("Store: snaxa"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_results_fragment_renders_errors() {
        let html = SearchResultsTemplate {
            outcome: SearchOutcome::NotFound,
        }
        .render()
        .unwrap();
        assert!(html.contains("Item not found"));

        let html = SearchResultsTemplate {
            outcome: SearchOutcome::Failed,
        }
        .render()
        .unwrap();
        assert!(html.contains("Error searching for item"));
    }

    #[test]
    fn test_idle_fragment_is_empty() {
        let html = SearchResultsTemplate {
            outcome: SearchOutcome::Idle,
        }
        .render()
        .unwrap();
        assert!(!html.contains("class=\"card\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_page_renders_store_checkboxes() {
        let html = SearchPageTemplate {
            query: "gum".to_string(),
            stores: store_toggles(StoreSelection::all()),
            outcome: SearchOutcome::Idle,
        }
        .render()
        .unwrap();

        assert!(html.contains("Search for Snacks!"));
        assert!(html.contains("value=\"gum\""));
        for store in Storefront::ALL {
            assert!(html.contains(&format!("value=\"{}\"", store.key())));
        }
        assert!(html.contains("How to Use This Page"));
    }
}
