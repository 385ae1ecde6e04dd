use crate::domain::customization::{
    CustomizationId, MutationOutcome, PaymentCustomization, PaymentCustomizationInput, UserError,
};
use crate::domain::ports::PaymentCustomizationApi;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A remote operation issued against the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Get(CustomizationId),
    Create,
    Update(CustomizationId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCustomization {
    pub function_id: String,
    pub title: String,
    pub enabled: bool,
    pub metafield_value: Option<String>,
}

#[derive(Default)]
struct State {
    customizations: HashMap<String, StoredCustomization>,
    next_id: u64,
}

/// A thread-safe in-memory stand-in for the remote payment customization resource.
///
/// Uses `Arc<RwLock<..>>` so clones share the same state. An instance built with
/// [`InMemoryPaymentCustomizations::recording`] also keeps a log of every call, which
/// lets tests observe exactly which remote operations a page issued.
#[derive(Default, Clone)]
pub struct InMemoryPaymentCustomizations {
    state: Arc<RwLock<State>>,
    recorder: Option<Arc<Mutex<Vec<ApiCall>>>>,
}

impl InMemoryPaymentCustomizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like `new`, but records every call for [`calls`](Self::calls).
    pub fn recording() -> Self {
        Self {
            recorder: Some(Arc::default()),
            ..Self::default()
        }
    }

    /// Seeds a customization with a raw metafield value and returns its id.
    pub async fn insert(&self, function_id: &str, metafield_value: Option<&str>) -> CustomizationId {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id.to_string();
        state.customizations.insert(
            id.clone(),
            StoredCustomization {
                function_id: function_id.to_string(),
                title: String::new(),
                enabled: true,
                metafield_value: metafield_value.map(str::to_string),
            },
        );
        CustomizationId::Existing(id)
    }

    pub async fn customization(&self, id: &CustomizationId) -> Option<StoredCustomization> {
        let state = self.state.read().await;
        state.customizations.get(&id.to_string()).cloned()
    }

    /// Calls issued so far; always empty unless built with `recording`.
    pub async fn calls(&self) -> Vec<ApiCall> {
        match &self.recorder {
            Some(recorder) => recorder.lock().await.clone(),
            None => Vec::new(),
        }
    }

    async fn record(&self, call: ApiCall) {
        if let Some(recorder) = &self.recorder {
            recorder.lock().await.push(call);
        }
    }

    fn validate(input: &PaymentCustomizationInput) -> Vec<UserError> {
        let mut errors = Vec::new();
        if input.function_id.is_empty() {
            errors.push(UserError::new("Function not found."));
        }
        errors
    }

    fn stored(input: &PaymentCustomizationInput) -> StoredCustomization {
        StoredCustomization {
            function_id: input.function_id.clone(),
            title: input.title.clone(),
            enabled: input.enabled,
            metafield_value: input.configuration_value().map(str::to_string),
        }
    }
}

#[async_trait]
impl PaymentCustomizationApi for InMemoryPaymentCustomizations {
    async fn get(&self, id: &CustomizationId) -> Result<Option<PaymentCustomization>> {
        self.record(ApiCall::Get(id.clone())).await;
        let state = self.state.read().await;
        Ok(state
            .customizations
            .get(&id.to_string())
            .map(|c| PaymentCustomization {
                id: id.gid().unwrap_or_default(),
                metafield_value: c.metafield_value.clone(),
            }))
    }

    async fn create(&self, input: PaymentCustomizationInput) -> Result<MutationOutcome> {
        self.record(ApiCall::Create).await;
        let mut state = self.state.write().await;

        let user_errors = Self::validate(&input);
        if !user_errors.is_empty() {
            return Ok(MutationOutcome {
                customization_id: None,
                user_errors,
            });
        }

        state.next_id += 1;
        let id = CustomizationId::Existing(state.next_id.to_string());
        state
            .customizations
            .insert(id.to_string(), Self::stored(&input));
        Ok(MutationOutcome {
            customization_id: id.gid(),
            user_errors: Vec::new(),
        })
    }

    async fn update(
        &self,
        id: &CustomizationId,
        input: PaymentCustomizationInput,
    ) -> Result<MutationOutcome> {
        self.record(ApiCall::Update(id.clone())).await;
        let mut state = self.state.write().await;

        let mut user_errors = Self::validate(&input);
        if !state.customizations.contains_key(&id.to_string()) {
            user_errors.push(UserError::new("Payment customization not found."));
        }
        if !user_errors.is_empty() {
            return Ok(MutationOutcome {
                customization_id: None,
                user_errors,
            });
        }

        state
            .customizations
            .insert(id.to_string(), Self::stored(&input));
        Ok(MutationOutcome {
            customization_id: id.gid(),
            user_errors: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::Configuration;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let api = InMemoryPaymentCustomizations::new();
        let input = PaymentCustomizationInput::for_configuration("fn", &Configuration::default()).unwrap();

        let first = api.create(input.clone()).await.unwrap();
        let second = api.create(input).await.unwrap();

        assert_eq!(
            first.customization_id.as_deref(),
            Some("gid://shopify/PaymentCustomization/1")
        );
        assert_eq!(
            second.customization_id.as_deref(),
            Some("gid://shopify/PaymentCustomization/2")
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_reports_user_error() {
        let api = InMemoryPaymentCustomizations::new();
        let input = PaymentCustomizationInput::for_configuration("fn", &Configuration::default()).unwrap();

        let outcome = api
            .update(&CustomizationId::parse("99"), input)
            .await
            .unwrap();

        assert_eq!(
            outcome.user_errors,
            vec![UserError::new("Payment customization not found.")]
        );
        assert!(api.customization(&CustomizationId::parse("99")).await.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_metafield() {
        let api = InMemoryPaymentCustomizations::new();
        let id = api.insert("fn", Some("{}")).await;
        let config = Configuration::new("PayPal", "gift-card");

        let input = PaymentCustomizationInput::for_configuration("fn", &config).unwrap();
        api.update(&id, input).await.unwrap();

        let stored = api.customization(&id).await.unwrap();
        assert_eq!(stored.metafield_value, Some(config.to_metafield_value().unwrap()));
        assert!(stored.enabled);
        assert_eq!(
            stored.title,
            "Hide PayPal if cart contains a products with a set handle"
        );
    }

    #[tokio::test]
    async fn test_get_records_call() {
        let api = InMemoryPaymentCustomizations::recording();
        let id = CustomizationId::parse("7");

        assert!(api.get(&id).await.unwrap().is_none());
        assert_eq!(api.calls().await, vec![ApiCall::Get(id)]);
    }

    #[tokio::test]
    async fn test_default_instance_keeps_no_call_log() {
        let api = InMemoryPaymentCustomizations::new();
        let input = PaymentCustomizationInput::for_configuration("fn", &Configuration::default())
            .unwrap();

        for _ in 0..3 {
            api.create(input.clone()).await.unwrap();
            api.get(&CustomizationId::parse("1")).await.unwrap();
        }

        assert!(api.calls().await.is_empty());
        assert!(api.recorder.is_none());
        assert!(api.customization(&CustomizationId::parse("3")).await.is_some());
    }
}
