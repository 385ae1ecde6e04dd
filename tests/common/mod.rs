#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn afterpay_configuration() -> String {
    json!({ "paymentMethodName": "Afterpay", "productHandles": "no-afterpay" }).to_string()
}

/// Builds a checkout function input with one product-variant line per handle.
pub fn run_input(configuration: Option<&str>, handles: &[&str], methods: &[(&str, &str)]) -> Value {
    let lines: Vec<Value> = handles
        .iter()
        .map(|handle| {
            json!({
                "merchandise": {
                    "__typename": "ProductVariant",
                    "product": { "handle": handle }
                }
            })
        })
        .collect();
    let methods: Vec<Value> = methods
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    let metafield = configuration.map(|value| json!({ "value": value }));

    json!({
        "cart": { "lines": lines },
        "paymentMethods": methods,
        "paymentCustomization": { "metafield": metafield }
    })
}

pub fn write_input(input: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", input).unwrap();
    file
}
