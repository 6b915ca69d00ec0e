//! Product filtering and sorting scenarios.

use crate::selectors;
use escaparate::prelude::*;

/// Following a collection link lands on a listing with visible products.
pub async fn filter_products_by_collection(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;

    let Some(collection) = cx.find(selectors::collection_link()).probe().await? else {
        return Ok(Flow::skipped("no collection navigation on storefront"));
    };
    collection.click().await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;

    expect_url(
        &cx.page,
        &UrlPattern::regex("collections|products"),
        cx.config.action_wait(),
    )
    .await?;
    expect_visible(&cx.page, &selectors::product_tile(), cx.config.action_wait()).await?;
    Ok(Flow::Completed)
}

/// Changing the sort option keeps the listing populated.
///
/// Only checks that the first product's text stays defined around the
/// re-sort; actual reordering is not verified, and the report carries a
/// note saying so.
pub async fn sort_products_updates_listing(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto("collections/all").await?;

    let Some(sort) = cx.find(selectors::sort_dropdown()).probe().await? else {
        return Ok(Flow::skipped("sort dropdown not present on listing"));
    };

    let before = match cx.find(selectors::product_card()).probe().await? {
        Some(card) => card.text_content().await?,
        None => None,
    };

    sort.select_option(1).await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;
    cx.settle().await;

    let after = match cx.find(selectors::product_card()).probe().await? {
        Some(card) => card.text_content().await?,
        None => None,
    };

    if before.is_none() || after.is_none() {
        return Err(EscaparateError::assertion(
            "product card text unavailable around sort change",
        ));
    }
    cx.note("sort only checks the first card stays rendered; ordering is not verified");
    Ok(Flow::Completed)
}
