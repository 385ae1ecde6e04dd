use crate::application::customization::CustomizationService;
use crate::domain::ports::PaymentCustomizationApiRef;
use crate::error::{CustomizationError, Result};
use crate::infrastructure::graphql::AdminGraphqlClient;
use crate::infrastructure::in_memory::InMemoryPaymentCustomizations;
use crate::infrastructure::session::OfflineTokenAuthenticator;
use clap::Args;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_API_VERSION: &str = "2023-07";
const IN_MEMORY_SHOP: &str = "demo.myshopify.com";

/// Settings of the admin UI server.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Address the admin UI listens on
    #[arg(long, env = "PC_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Shop domain, e.g. `my-store.myshopify.com`
    #[arg(long, env = "SHOPIFY_SHOP")]
    pub shop: Option<String>,

    /// Offline access token for the admin API
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Base URL of the admin API. Defaults to `https://{shop}`.
    #[arg(long)]
    pub admin_url: Option<Url>,

    /// Bearer token admin requests must present. Requests are not checked when unset.
    #[arg(long, env = "PC_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Keep payment customizations in memory instead of calling the admin API
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeConfig {
    fn shop(&self) -> Result<String> {
        match (&self.shop, self.in_memory) {
            (Some(shop), _) => Ok(shop.clone()),
            (None, true) => Ok(IN_MEMORY_SHOP.to_string()),
            (None, false) => Err(CustomizationError::Settings(
                "--shop is required unless --in-memory is set".to_string(),
            )),
        }
    }

    fn admin_api(&self, shop: &str) -> Result<PaymentCustomizationApiRef> {
        if self.in_memory {
            return Ok(Arc::new(InMemoryPaymentCustomizations::new()));
        }

        let access_token = self.access_token.clone().ok_or_else(|| {
            CustomizationError::Settings(
                "--access-token is required unless --in-memory is set".to_string(),
            )
        })?;
        let admin_url = match &self.admin_url {
            Some(url) => url.clone(),
            None => Url::parse(&format!("https://{shop}"))
                .map_err(|e| CustomizationError::Settings(format!("invalid shop domain: {e}")))?,
        };
        Ok(Arc::new(AdminGraphqlClient::new(
            &admin_url,
            &self.api_version,
            access_token,
        )))
    }

    /// Wires the admin API adapter and authenticator into the page service.
    pub fn service(&self) -> Result<CustomizationService> {
        let shop = self.shop()?;
        let admin = self.admin_api(&shop)?;
        let authenticator = OfflineTokenAuthenticator::new(shop, self.session_token.clone(), admin);
        Ok(CustomizationService::new(Arc::new(authenticator)))
    }
}
