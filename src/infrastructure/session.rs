use crate::domain::customization::Session;
use crate::domain::ports::{
    AdminContext, Authenticator, PaymentCustomizationApiRef, RequestCredentials,
};
use crate::error::{CustomizationError, Result};
use async_trait::async_trait;

/// Authenticates every admin request as the single shop the app was installed on.
///
/// The admin API client carries the shop's offline access token. When a session
/// token is configured, requests must present it as a bearer token.
pub struct OfflineTokenAuthenticator {
    shop: String,
    session_token: Option<String>,
    admin: PaymentCustomizationApiRef,
}

impl OfflineTokenAuthenticator {
    pub fn new(
        shop: impl Into<String>,
        session_token: Option<String>,
        admin: PaymentCustomizationApiRef,
    ) -> Self {
        Self {
            shop: shop.into(),
            session_token,
            admin,
        }
    }
}

#[async_trait]
impl Authenticator for OfflineTokenAuthenticator {
    async fn admin(&self, credentials: &RequestCredentials) -> Result<AdminContext> {
        if let Some(expected) = &self.session_token
            && credentials.bearer.as_deref() != Some(expected.as_str())
        {
            tracing::warn!(shop = %self.shop, "Rejected admin request without a valid session token");
            return Err(CustomizationError::Unauthorized);
        }

        Ok(AdminContext {
            session: Session {
                shop: self.shop.clone(),
            },
            admin: self.admin.clone(),
        })
    }
}
