//! Authentication scenarios.
//!
//! The storefront is password-agnostic demo data; both scenarios probe for
//! the login link first and skip when the theme does not render one.

use crate::selectors;
use escaparate::prelude::*;

/// Known-good demo credentials
pub const VALID_EMAIL: &str = "test@example.com";
/// Known-good demo password
pub const VALID_PASSWORD: &str = "password123";
/// Credentials that must be rejected
pub const INVALID_EMAIL: &str = "invalid@test.com";
/// Password that must be rejected
pub const INVALID_PASSWORD: &str = "wrongpassword";

/// Open the storefront and walk into the login form.
///
/// Returns false when the login link is absent (soft skip for the caller).
async fn open_login_form(cx: &ScenarioCx) -> EscaparateResult<bool> {
    cx.goto_base().await?;
    let Some(login_link) = cx.find(selectors::login_link()).probe().await? else {
        return Ok(false);
    };
    login_link.click().await?;
    cx.page
        .wait_for_load_state(LoadState::NetworkIdle, cx.config.navigation_wait())
        .await?;
    Ok(true)
}

async fn submit_credentials(cx: &ScenarioCx, email: &str, password: &str) -> EscaparateResult<()> {
    cx.find(selectors::email_input())
        .resolve()
        .await?
        .fill(email)
        .await?;
    cx.find(selectors::password_input())
        .resolve()
        .await?
        .fill(password)
        .await?;
    cx.find(selectors::submit_button())
        .resolve()
        .await?
        .click()
        .await?;
    Ok(())
}

/// Valid credentials land on an account page.
pub async fn login_with_valid_credentials(cx: &mut ScenarioCx) -> EscaparateResult<Flow> {
    if !open_login_form(cx).await? {
        return Ok(Flow::skipped("login link not present on storefront"));
    }
    submit_credentials(cx, VALID_EMAIL, VALID_PASSWORD).await?;
    expect_url(
        &cx.page,
        &UrlPattern::regex("account|customer"),
        cx.config.action_wait(),
    )
    .await?;
    Ok(Flow::Completed)
}

/// Invalid credentials surface an error indicator, never a success state.
pub async fn login_with_invalid_credentials_shows_error(
    cx: &mut ScenarioCx,
) -> EscaparateResult<Flow> {
    if !open_login_form(cx).await? {
        return Ok(Flow::skipped("login link not present on storefront"));
    }
    submit_credentials(cx, INVALID_EMAIL, INVALID_PASSWORD).await?;
    expect_visible(&cx.page, &selectors::error_message(), cx.config.action_wait()).await?;
    Ok(Flow::Completed)
}
