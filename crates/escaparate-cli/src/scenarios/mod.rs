//! The flat scenario registry.
//!
//! Every scenario re-navigates from a clean entry point and never depends on
//! another scenario's side effects; the runner may execute them in any
//! order.

pub mod a11y;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod crud;
pub mod edge;

use escaparate::{EscaparateResult, Flow, Scenario, ScenarioCx};
use futures::future::BoxFuture;

macro_rules! scenario {
    ($group:literal, $name:literal, $body:path) => {{
        fn body(cx: &mut ScenarioCx) -> BoxFuture<'_, EscaparateResult<Flow>> {
            Box::pin($body(cx))
        }
        Scenario::new($group, $name, body)
    }};
}

/// All scenarios, in suite order
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![
        scenario!("auth", "login_with_valid_credentials", auth::login_with_valid_credentials),
        scenario!(
            "auth",
            "login_with_invalid_credentials_shows_error",
            auth::login_with_invalid_credentials_shows_error
        ),
        scenario!("cart", "add_item_and_proceed_to_checkout", cart::add_item_and_proceed_to_checkout),
        scenario!("cart", "empty_cart_blocks_checkout", cart::empty_cart_blocks_checkout),
        scenario!("catalog", "filter_products_by_collection", catalog::filter_products_by_collection),
        scenario!("catalog", "sort_products_updates_listing", catalog::sort_products_updates_listing),
        scenario!("crud", "cart_item_create_update_delete", crud::cart_item_create_update_delete),
        scenario!("a11y", "homepage_accessibility_scan", a11y::homepage_accessibility_scan),
        scenario!("a11y", "product_page_accessibility_scan", a11y::product_page_accessibility_scan),
        scenario!("a11y", "landmarks_and_button_labels", a11y::landmarks_and_button_labels),
        scenario!("edge", "rapid_cart_additions", edge::rapid_cart_additions),
        scenario!("edge", "search_returns_results_page", edge::search_returns_results_page),
    ]
}

/// Scenarios whose qualified name contains the filter
#[must_use]
pub fn filtered(filter: Option<&str>) -> Vec<Scenario> {
    match filter {
        None => all(),
        Some(needle) => all()
            .into_iter()
            .filter(|s| s.qualified_name().contains(needle))
            .collect(),
    }
}
