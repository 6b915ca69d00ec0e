//! Selector chains for the storefront under test.
//!
//! The target is an uncontrolled third-party Shopify theme, so every lookup
//! carries fallbacks: theme-specific classes first, generic attribute and
//! ARIA hooks last. These strings are scenario glue, not a contract — when
//! the theme changes, this is the file to fix.

use escaparate::SelectorChain;

/// Link into the login flow
#[must_use]
pub fn login_link() -> SelectorChain {
    SelectorChain::css("a[href*=\"account/login\"]").or_css_with_text("a", "Log in")
}

/// Login email field
#[must_use]
pub fn email_input() -> SelectorChain {
    SelectorChain::css("input[type=\"email\"]").or_css("input[name=\"customer[email]\"]")
}

/// Login password field
#[must_use]
pub fn password_input() -> SelectorChain {
    SelectorChain::css("input[type=\"password\"]").or_css("input[name=\"customer[password]\"]")
}

/// Login form submit control
#[must_use]
pub fn submit_button() -> SelectorChain {
    SelectorChain::css("button[type=\"submit\"]").or_css("input[type=\"submit\"]")
}

/// Error / alert indicators shown on failed login
#[must_use]
pub fn error_message() -> SelectorChain {
    SelectorChain::css(".errors")
        .or_css(".error")
        .or_css("[class*=\"error\"]")
        .or_css("[role=\"alert\"]")
}

/// Any product detail link
#[must_use]
pub fn product_link() -> SelectorChain {
    SelectorChain::css("a[href*=\"/products/\"]")
}

/// Add-to-cart control on a product page
#[must_use]
pub fn add_to_cart_button() -> SelectorChain {
    SelectorChain::css_with_text("button", "Add to cart")
        .or_css("button[name=\"add\"]")
        .or_css_with_text("[type=\"submit\"]", "Add")
}

/// Link to the cart page
#[must_use]
pub fn cart_link() -> SelectorChain {
    SelectorChain::css("a[href*=\"/cart\"]")
}

/// Cart line items
#[must_use]
pub fn cart_items() -> SelectorChain {
    SelectorChain::css(".cart-item")
        .or_css("[class*=\"cart-item\"]")
        .or_css(".line-item")
}

/// Checkout control
#[must_use]
pub fn checkout_button() -> SelectorChain {
    SelectorChain::css_with_text("button", "Check out")
        .or_css_with_text("a", "Check out")
        .or_css("[name=\"checkout\"]")
}

/// Empty-cart indicator (text probe, like Playwright's `:has-text`)
#[must_use]
pub fn empty_cart_message() -> SelectorChain {
    SelectorChain::css_with_text("*", "empty").or_css_with_text("*", "no items")
}

/// Collection / category navigation link
#[must_use]
pub fn collection_link() -> SelectorChain {
    SelectorChain::css("a[href*=\"/collections/\"]")
        .or_css("nav a")
        .or_css(".menu a")
}

/// Product tiles on a listing page
#[must_use]
pub fn product_tile() -> SelectorChain {
    SelectorChain::css("a[href*=\"/products/\"]")
        .or_css(".product-item")
        .or_css("[class*=\"product\"]")
}

/// Sort dropdown on a collection page
#[must_use]
pub fn sort_dropdown() -> SelectorChain {
    SelectorChain::css("select[name*=\"sort\"]")
        .or_css("select#SortBy")
        .or_css("[class*=\"sort\"] select")
}

/// Product cards used to observe sort order
#[must_use]
pub fn product_card() -> SelectorChain {
    SelectorChain::css(".product-item").or_css("[class*=\"product-card\"]")
}

/// Cart line quantity input
#[must_use]
pub fn quantity_input() -> SelectorChain {
    SelectorChain::css("input[type=\"number\"]").or_css("input[name*=\"quantity\"]")
}

/// Cart line remove control
#[must_use]
pub fn remove_button() -> SelectorChain {
    SelectorChain::css_with_text("a", "Remove")
        .or_css_with_text("button", "Remove")
        .or_css("[class*=\"remove\"]")
}

/// Navigation landmark
#[must_use]
pub fn nav_landmark() -> SelectorChain {
    SelectorChain::css("nav").or_css("[role=\"navigation\"]")
}

/// Main content landmark
#[must_use]
pub fn main_landmark() -> SelectorChain {
    SelectorChain::css("main").or_css("[role=\"main\"]")
}

/// Search input
#[must_use]
pub fn search_input() -> SelectorChain {
    SelectorChain::css("input[type=\"search\"]")
        .or_css("input[name=\"q\"]")
        .or_css("[placeholder*=\"Search\"]")
}
