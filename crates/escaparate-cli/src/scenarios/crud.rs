//! Cart line lifecycle: create, update quantity, delete.
//!
//! Create is required; update and delete are probe-gated because some
//! themes render neither a quantity input nor a remove control.

use crate::selectors;
use escaparate::prelude::*;

/// Add a cart line, bump its quantity, then remove it.
pub async fn cart_item_create_update_delete(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    // Create
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

    cx.goto("cart").await?;
    expect_visible(&cx.page, &selectors::cart_items(), cx.config.action_wait()).await?;

    // Update
    if let Some(quantity) = cx.find(selectors::quantity_input()).probe().await? {
        quantity.fill("2").await?;
        quantity.press("Enter").await?;
        cx.settle().await;
        expect_value(
            &cx.page,
            &selectors::quantity_input(),
            "2",
            cx.config.action_wait(),
        )
        .await?;
    }

    // Delete
    if let Some(remove) = cx.find(selectors::remove_button()).probe().await? {
        remove.click().await?;
        cx.settle().await;
        let remaining = cx.find(selectors::cart_items()).count().await?;
        if remaining > 0 {
            let empty_shown = cx
                .find(selectors::empty_cart_message())
                .probe()
                .await?
                .is_some();
            if !empty_shown {
                return Err(EscaparateError::assertion(
                    "cart line still present after removal",
                ));
            }
        }
    }

    Ok(Flow::Completed)
}
