//! Edge cases: rapid interactions and search.

use crate::selectors;
use escaparate::prelude::*;

/// How many times the add-to-cart control is hammered
const RAPID_CLICKS: usize = 3;

/// Rapid add-to-cart clicks still leave the cart in a sane, non-empty
/// state. Whether the storefront deduplicated or summed the additions is
/// not verified; the report carries a note saying so.
pub async fn rapid_cart_additions(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;
    cx.find(selectors::product_link())
        .resolve()
        .await?
        .click()
        .await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;

    let add_to_cart = cx.find(selectors::add_to_cart_button()).resolve().await?;
    for _ in 0..RAPID_CLICKS {
        add_to_cart.click().await?;
        cx.settle().await;
    }

    cx.goto("cart").await?;
    expect_count_at_least(&cx.page, &selectors::cart_items(), 1, cx.config.action_wait()).await?;
    cx.note("rapid additions only check a non-empty cart; deduplication is not verified");
    Ok(Flow::Completed)
}

/// Submitting a search lands on a results URL.
pub async fn search_returns_results_page(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;

    let Some(search) = cx.find(selectors::search_input()).probe().await? else {
        return Ok(Flow::skipped("no search input on storefront"));
    };
    search.fill("test product").await?;
    search.press("Enter").await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;

    expect_url(
        &cx.page,
        &UrlPattern::regex("search|q="),
        cx.config.action_wait(),
    )
    .await?;
    Ok(Flow::Completed)
}
