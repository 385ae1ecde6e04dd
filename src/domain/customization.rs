use super::configuration::{
    Configuration, METAFIELD_KEY, METAFIELD_NAMESPACE, METAFIELD_TYPE,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

const GID_PREFIX: &str = "gid://shopify/PaymentCustomization/";

/// Identifies the payment customization an admin page works on.
///
/// The route segment `new` means no remote resource exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomizationId {
    New,
    Existing(String),
}

impl CustomizationId {
    pub fn parse(segment: &str) -> Self {
        if segment == "new" {
            Self::New
        } else {
            Self::Existing(segment.to_string())
        }
    }

    /// Global id understood by the admin API, `None` for a customization not yet created.
    pub fn gid(&self) -> Option<String> {
        match self {
            Self::New => None,
            Self::Existing(id) => Some(format!("{GID_PREFIX}{id}")),
        }
    }
}

impl fmt::Display for CustomizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::Existing(id) => f.write_str(id),
        }
    }
}

/// A payment customization as read back from the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCustomization {
    pub id: String,
    pub metafield_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCustomizationInput {
    pub function_id: String,
    pub title: String,
    pub enabled: bool,
    pub metafields: Vec<MetafieldInput>,
}

impl PaymentCustomizationInput {
    /// Builds the mutation input persisting `configuration` for the given function.
    pub fn for_configuration(
        function_id: impl Into<String>,
        configuration: &Configuration,
    ) -> Result<Self> {
        Ok(Self {
            function_id: function_id.into(),
            title: format!(
                "Hide {} if cart contains a products with a set handle",
                configuration.payment_method_name
            ),
            enabled: true,
            metafields: vec![MetafieldInput {
                namespace: METAFIELD_NAMESPACE.to_string(),
                key: METAFIELD_KEY.to_string(),
                r#type: METAFIELD_TYPE.to_string(),
                value: configuration.to_metafield_value()?,
            }],
        })
    }

    pub fn configuration_value(&self) -> Option<&str> {
        self.metafields
            .iter()
            .find(|m| m.namespace == METAFIELD_NAMESPACE && m.key == METAFIELD_KEY)
            .map(|m| m.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetafieldInput {
    pub namespace: String,
    pub key: String,
    pub r#type: String,
    pub value: String,
}

/// A validation message reported by the admin API for a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    pub message: String,
}

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a create or update mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    pub customization_id: Option<String>,
    pub user_errors: Vec<UserError>,
}

/// The authenticated admin session for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub shop: String,
}

impl Session {
    /// Shop name without the platform domain suffix.
    pub fn shop_name(&self) -> &str {
        self.shop
            .strip_suffix(".myshopify.com")
            .unwrap_or(&self.shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customization_id_parsing() {
        assert_eq!(CustomizationId::parse("new"), CustomizationId::New);
        assert_eq!(CustomizationId::New.gid(), None);

        let id = CustomizationId::parse("42");
        assert_eq!(
            id.gid().as_deref(),
            Some("gid://shopify/PaymentCustomization/42")
        );
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_input_for_configuration() {
        let input = PaymentCustomizationInput::for_configuration(
            "fn-1",
            &Configuration::new("Afterpay", "no-afterpay"),
        )
        .unwrap();

        assert_eq!(
            input.title,
            "Hide Afterpay if cart contains a products with a set handle"
        );
        assert!(input.enabled);
        assert_eq!(input.metafields.len(), 1);
        assert_eq!(input.metafields[0].namespace, "$app:payment-customization");
        assert_eq!(input.metafields[0].key, "function-configuration");
        assert_eq!(input.metafields[0].r#type, "json");

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["functionId"], "fn-1");
        assert_eq!(json["metafields"][0]["type"], "json");
    }

    #[test]
    fn test_shop_name_strips_domain() {
        let session = Session {
            shop: "demo-store.myshopify.com".to_string(),
        };
        assert_eq!(session.shop_name(), "demo-store");
    }
}
