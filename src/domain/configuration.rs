use crate::error::Result;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PAYMENT_METHOD_NAME: &str = "Afterpay";
pub const DEFAULT_PRODUCT_HANDLES: &str = "no-afterpay";

/// Metafield namespace holding the function configuration, owned by the app.
pub const METAFIELD_NAMESPACE: &str = "$app:payment-customization";
pub const METAFIELD_KEY: &str = "function-configuration";
pub const METAFIELD_TYPE: &str = "json";

/// Merchant-facing configuration of the "hide payment method" rule.
///
/// `product_handles` is kept exactly as the merchant typed it: a comma-separated
/// list in a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub payment_method_name: String,
    pub product_handles: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            payment_method_name: DEFAULT_PAYMENT_METHOD_NAME.to_string(),
            product_handles: DEFAULT_PRODUCT_HANDLES.to_string(),
        }
    }
}

impl Configuration {
    pub fn new(payment_method_name: impl Into<String>, product_handles: impl Into<String>) -> Self {
        Self {
            payment_method_name: payment_method_name.into(),
            product_handles: product_handles.into(),
        }
    }

    /// Reads a stored metafield value, taking each field from it when present and
    /// the default otherwise. An unparsable value yields the defaults.
    pub fn from_metafield_value(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        match StoredConfiguration::parse(value) {
            Ok(stored) => {
                let defaults = Self::default();
                Self {
                    payment_method_name: stored
                        .payment_method_name
                        .unwrap_or(defaults.payment_method_name),
                    product_handles: stored.product_handles.unwrap_or(defaults.product_handles),
                }
            }
            Err(e) => {
                tracing::warn!("Stored configuration is not readable, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Serializes the configuration into the metafield value format.
    pub fn to_metafield_value(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Configuration as the checkout function sees it: any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredConfiguration {
    pub payment_method_name: Option<String>,
    pub product_handles: Option<String>,
}

impl StoredConfiguration {
    /// Parses a stored metafield value.
    ///
    /// Only the string properties of a JSON object are read; any other JSON value has
    /// no properties and yields an empty configuration. Malformed JSON and `null` are
    /// errors.
    pub fn parse(value: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(value)? {
            Value::Object(map) => Ok(Self {
                payment_method_name: string_property(&map, "paymentMethodName"),
                product_handles: string_property(&map, "productHandles"),
            }),
            Value::Null => Err(serde_json::Error::custom("configuration is null").into()),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the configuration only when both fields are present and non-empty.
    pub fn complete(self) -> Option<Configuration> {
        match (self.payment_method_name, self.product_handles) {
            (Some(name), Some(handles)) if !name.is_empty() && !handles.is_empty() => {
                Some(Configuration::new(name, handles))
            }
            _ => None,
        }
    }
}

fn string_property(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metafield_uses_defaults() {
        let config = Configuration::from_metafield_value(None);
        assert_eq!(config, Configuration::new("Afterpay", "no-afterpay"));
    }

    #[test]
    fn test_partial_metafield_falls_back_per_field() {
        let config = Configuration::from_metafield_value(Some(r#"{"paymentMethodName":"Klarna"}"#));
        assert_eq!(config.payment_method_name, "Klarna");
        assert_eq!(config.product_handles, "no-afterpay");
    }

    #[test]
    fn test_malformed_metafield_uses_defaults() {
        let config = Configuration::from_metafield_value(Some("{not json"));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_non_object_metafield_uses_defaults() {
        for value in [r#"["Klarna","x"]"#, "1", "true", r#""Klarna""#, "null"] {
            assert_eq!(
                Configuration::from_metafield_value(Some(value)),
                Configuration::default(),
                "value {value} should load the defaults"
            );
        }
    }

    #[test]
    fn test_parse_reads_only_object_properties() {
        let stored = StoredConfiguration::parse(r#"["Afterpay","no-afterpay"]"#).unwrap();
        assert_eq!(stored, StoredConfiguration::default());

        let stored = StoredConfiguration::parse("1").unwrap();
        assert_eq!(stored, StoredConfiguration::default());

        let stored =
            StoredConfiguration::parse(r#"{"paymentMethodName":"Afterpay","productHandles":7}"#)
                .unwrap();
        assert_eq!(stored.payment_method_name.as_deref(), Some("Afterpay"));
        assert_eq!(stored.product_handles, None);
    }

    #[test]
    fn test_parse_rejects_null_and_malformed_json() {
        assert!(StoredConfiguration::parse("null").is_err());
        assert!(StoredConfiguration::parse("{oops").is_err());
    }

    #[test]
    fn test_metafield_value_is_camel_case_json() {
        let value = Configuration::new("Cash on Delivery", "a,b")
            .to_metafield_value()
            .unwrap();
        assert_eq!(
            value,
            r#"{"paymentMethodName":"Cash on Delivery","productHandles":"a,b"}"#
        );
    }

    #[test]
    fn test_empty_fields_are_incomplete() {
        let stored = StoredConfiguration {
            payment_method_name: Some(String::new()),
            product_handles: Some("no-afterpay".to_string()),
        };
        assert!(stored.complete().is_none());
        assert!(StoredConfiguration::default().complete().is_none());
    }
}
