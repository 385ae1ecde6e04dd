//! Server-rendered admin pages.

use crate::domain::customization::UserError;
use crate::interfaces::http::ConfigurationForm;

/// Deep link to the payment customizations list in the platform admin.
pub const CUSTOMIZATIONS_DEEP_LINK: &str = "shopify:admin/settings/payments/customizations";

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

pub fn index(shop_name: &str) -> String {
    let body = format!(
        r#"<ui-title-bar title="Hide a payment method demo"></ui-title-bar>
<main class="page">
    <section class="card">
        <h2>👋 Welcome!</h2>
        <p>Hide a payment method demo app</p>
        <p class="shop">{shop}</p>
    </section>
</main>"#,
        shop = escape(shop_name),
    );
    layout("Hide a payment method demo", &body)
}

/// The edit form, optionally preceded by the errors of a failed save.
pub fn edit(form: &ConfigurationForm, errors: &[UserError]) -> String {
    let banner = if errors.is_empty() {
        String::new()
    } else {
        let items: String = errors
            .iter()
            .map(|e| format!("            <li>{}</li>\n", escape(&e.message)))
            .collect();
        format!(
            r#"    <section class="banner critical" role="alert">
        <h2>There was an error creating the customization.</h2>
        <ul>
{items}        </ul>
    </section>
"#
        )
    };

    let body = format!(
        r#"<header class="page-header">
    <a class="back" href="{link}" target="_top">Payment customizations</a>
    <h1>Hide payment method</h1>
</header>
<main class="page">
{banner}    <section class="card">
        <form method="post">
            <label for="paymentMethodName">Payment method</label>
            <input id="paymentMethodName" name="paymentMethodName" type="text" value="{name}" autocomplete="on" required>
            <label for="productHandles">Product handles</label>
            <input id="productHandles" name="productHandles" type="text" value="{handles}" autocomplete="on" required>
            <p class="help">Comma-separated list of product handles</p>
            <button type="submit" class="primary">Save</button>
        </form>
    </section>
</main>"#,
        link = CUSTOMIZATIONS_DEEP_LINK,
        name = escape(&form.payment_method_name),
        handles = escape(&form.product_handles),
    );
    layout("Hide payment method", &body)
}

/// Sends the top-level browsing context back to the customizations list.
pub fn saved() -> String {
    let body = format!(
        r#"<script>open("{link}", "_top");</script>
<p>Saved. <a href="{link}" target="_top">Back to payment customizations</a></p>"#,
        link = CUSTOMIZATIONS_DEEP_LINK,
    );
    layout("Hide payment method", &body)
}

pub fn error(message: &str) -> String {
    let body = format!(
        r#"<main class="page">
    <h1>Something went wrong</h1>
    <p>{}</p>
</main>"#,
        escape(message)
    );
    layout("Error", &body)
}
