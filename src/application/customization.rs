use crate::domain::configuration::Configuration;
use crate::domain::customization::{CustomizationId, PaymentCustomizationInput, Session, UserError};
use crate::domain::ports::{AuthenticatorRef, RequestCredentials};
use crate::error::Result;
use tracing::{debug, info};

/// Loader and action logic behind the admin pages.
///
/// Every request authenticates through the injected `Authenticator` and talks to the
/// admin API it hands back. Nothing is cached between requests.
pub struct CustomizationService {
    authenticator: AuthenticatorRef,
}

impl CustomizationService {
    pub fn new(authenticator: AuthenticatorRef) -> Self {
        Self { authenticator }
    }

    /// Returns the session of the shop the request belongs to.
    pub async fn session(&self, credentials: &RequestCredentials) -> Result<Session> {
        let context = self.authenticator.admin(credentials).await?;
        Ok(context.session)
    }

    /// Loads the configuration shown on the edit page.
    ///
    /// A new customization gets the defaults without authenticating or calling the
    /// admin API. For an existing one, missing or unreadable stored values also fall
    /// back to the defaults, while remote failures are returned.
    pub async fn load(
        &self,
        credentials: &RequestCredentials,
        id: &CustomizationId,
    ) -> Result<Configuration> {
        if *id == CustomizationId::New {
            return Ok(Configuration::default());
        }

        let context = self.authenticator.admin(credentials).await?;
        let customization = context.admin.get(id).await?;
        debug!(id = %id, found = customization.is_some(), "Loaded payment customization");

        Ok(Configuration::from_metafield_value(
            customization
                .as_ref()
                .and_then(|c| c.metafield_value.as_deref()),
        ))
    }

    /// Persists the configuration, creating the customization when `id` is `new`.
    ///
    /// Returns the user errors reported by the admin API; an empty list means the save
    /// succeeded.
    pub async fn save(
        &self,
        credentials: &RequestCredentials,
        function_id: &str,
        id: &CustomizationId,
        configuration: &Configuration,
    ) -> Result<Vec<UserError>> {
        let context = self.authenticator.admin(credentials).await?;
        let input = PaymentCustomizationInput::for_configuration(function_id, configuration)?;

        let outcome = match id {
            CustomizationId::New => context.admin.create(input).await?,
            CustomizationId::Existing(_) => context.admin.update(id, input).await?,
        };

        info!(
            shop = %context.session.shop,
            id = outcome.customization_id.as_deref().unwrap_or("-"),
            user_errors = outcome.user_errors.len(),
            "Saved payment customization"
        );
        Ok(outcome.user_errors)
    }
}
