//! Cart and checkout scenarios.

use crate::selectors;
use escaparate::prelude::*;

/// Add the first product to the cart and walk through to checkout.
pub async fn add_item_and_proceed_to_checkout(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto_base().await?;

    cx.find(selectors::product_link())
        .resolve()
        .await?
        .click()
        .await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;

    cx.find(selectors::add_to_cart_button())
        .resolve()
        .await?
        .click()
        .await?;
    cx.settle().await;

    cx.find(selectors::cart_link())
        .resolve()
        .await?
        .click()
        .await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;
    expect_visible(&cx.page, &selectors::cart_items(), cx.config.action_wait()).await?;

    cx.find(selectors::checkout_button())
        .resolve()
        .await?
        .click()
        .await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;
    expect_url(
        &cx.page,
        &UrlPattern::regex("checkout|checkouts"),
        cx.config.action_wait(),
    )
    .await?;
    Ok(Flow::Completed)
}

/// An empty cart must show an empty indicator or a disabled checkout
/// control, never an enabled one.
pub async fn empty_cart_blocks_checkout(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    cx.goto("cart").await?;

    if cx
        .find(selectors::empty_cart_message())
        .probe()
        .await?
        .is_some()
    {
        return Ok(Flow::Completed);
    }

    let Some(checkout) = cx.find(selectors::checkout_button()).probe().await? else {
        return Ok(Flow::skipped(
            "neither empty indicator nor checkout control rendered",
        ));
    };
    if checkout.is_disabled().await? {
        Ok(Flow::Completed)
    } else {
        Err(EscaparateError::assertion(
            "checkout control is enabled on an empty cart",
        ))
    }
}
