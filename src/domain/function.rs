//! Input and output shapes of the checkout function.
//!
//! Field names follow the platform's fixed schema and must not change.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    pub cart: Cart,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub payment_customization: Option<PaymentCustomizationInputData>,
}

impl RunInput {
    /// The raw metafield value holding the configuration, if any.
    pub fn configuration_value(&self) -> Option<&str> {
        self.payment_customization
            .as_ref()
            .and_then(|pc| pc.metafield.as_ref())
            .map(|m| m.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartLine {
    pub merchandise: Merchandise,
}

/// What a cart line sells. Only product variants carry a handle; anything else,
/// including a line whose `__typename` is missing, never matches a handle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawMerchandise")]
pub enum Merchandise {
    ProductVariant { product: Product },
    Other,
}

#[derive(Deserialize)]
struct RawMerchandise {
    #[serde(rename = "__typename", default)]
    typename: Option<String>,
    #[serde(default)]
    product: Option<Product>,
}

impl From<RawMerchandise> for Merchandise {
    fn from(raw: RawMerchandise) -> Self {
        match (raw.typename.as_deref(), raw.product) {
            (Some("ProductVariant"), Some(product)) => Self::ProductVariant { product },
            _ => Self::Other,
        }
    }
}

impl Merchandise {
    pub fn product_handle(&self) -> Option<&str> {
        match self {
            Self::ProductVariant { product } => Some(product.handle.as_str()),
            Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub handle: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentCustomizationInputData {
    #[serde(default)]
    pub metafield: Option<Metafield>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metafield {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FunctionRunResult {
    pub operations: Vec<Operation>,
}

impl FunctionRunResult {
    pub fn no_changes() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Hide(HideOperation),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HideOperation {
    pub payment_method_id: String,
}
