//! Admin UI routes.

pub mod pages;

use crate::application::customization::CustomizationService;
use crate::domain::configuration::Configuration;
use crate::domain::customization::CustomizationId;
use crate::domain::ports::RequestCredentials;
use crate::error::CustomizationError;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Local view-model of the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationForm {
    pub payment_method_name: String,
    pub product_handles: String,
}

impl From<Configuration> for ConfigurationForm {
    fn from(configuration: Configuration) -> Self {
        Self {
            payment_method_name: configuration.payment_method_name,
            product_handles: configuration.product_handles,
        }
    }
}

impl From<&ConfigurationForm> for Configuration {
    fn from(form: &ConfigurationForm) -> Self {
        Configuration::new(&form.payment_method_name, &form.product_handles)
    }
}

#[derive(Clone)]
struct AppState {
    service: Arc<CustomizationService>,
}

pub fn router(service: CustomizationService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };
    Router::new()
        .route("/app", get(index))
        .route(
            "/app/payment-customization/{function_id}/{id}",
            get(edit).post(save),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn credentials(headers: &HeaderMap) -> RequestCredentials {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());
    RequestCredentials { bearer }
}

impl IntoResponse for CustomizationError {
    fn into_response(self) -> Response {
        let status = match &self {
            CustomizationError::Unauthorized => StatusCode::UNAUTHORIZED,
            e if e.is_remote() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("Request failed with {}: {}", status, self);
        (status, Html(pages::error(&self.to_string()))).into_response()
    }
}

async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, CustomizationError> {
    let session = state.service.session(&credentials(&headers)).await?;
    Ok(Html(pages::index(session.shop_name())))
}

async fn edit(
    State(state): State<AppState>,
    Path((_function_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, CustomizationError> {
    let configuration = state
        .service
        .load(&credentials(&headers), &CustomizationId::parse(&id))
        .await?;
    Ok(Html(pages::edit(&configuration.into(), &[])))
}

async fn save(
    State(state): State<AppState>,
    Path((function_id, id)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<ConfigurationForm>,
) -> Result<Html<String>, CustomizationError> {
    let errors = state
        .service
        .save(
            &credentials(&headers),
            &function_id,
            &CustomizationId::parse(&id),
            &Configuration::from(&form),
        )
        .await?;

    if errors.is_empty() {
        Ok(Html(pages::saved()))
    } else {
        Ok(Html(pages::edit(&form, &errors)))
    }
}
