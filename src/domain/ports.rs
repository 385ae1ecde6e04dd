use super::customization::{
    CustomizationId, MutationOutcome, PaymentCustomization, PaymentCustomizationInput, Session,
};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read and write access to payment customizations on the remote platform.
#[async_trait]
pub trait PaymentCustomizationApi: Send + Sync {
    /// Fetches a customization with its configuration metafield.
    async fn get(&self, id: &CustomizationId) -> Result<Option<PaymentCustomization>>;
    async fn create(&self, input: PaymentCustomizationInput) -> Result<MutationOutcome>;
    async fn update(
        &self,
        id: &CustomizationId,
        input: PaymentCustomizationInput,
    ) -> Result<MutationOutcome>;
}

/// Credentials carried by an incoming admin request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    pub bearer: Option<String>,
}

/// Capabilities granted to an authenticated admin request.
#[derive(Clone)]
pub struct AdminContext {
    pub session: Session,
    pub admin: PaymentCustomizationApiRef,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn admin(&self, credentials: &RequestCredentials) -> Result<AdminContext>;
}

pub type PaymentCustomizationApiRef = Arc<dyn PaymentCustomizationApi>;
pub type AuthenticatorRef = Arc<dyn Authenticator>;
