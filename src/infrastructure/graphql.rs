use crate::domain::customization::{
    CustomizationId, MutationOutcome, PaymentCustomization, PaymentCustomizationInput, UserError,
};
use crate::domain::ports::PaymentCustomizationApi;
use crate::error::{CustomizationError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

const GET_PAYMENT_CUSTOMIZATION: &str = r#"
query getPaymentCustomization($id: ID!) {
  paymentCustomization(id: $id) {
    id
    metafield(namespace: "$app:payment-customization", key: "function-configuration") {
      value
    }
  }
}"#;

const CREATE_PAYMENT_CUSTOMIZATION: &str = r#"
mutation createPaymentCustomization($input: PaymentCustomizationInput!) {
  paymentCustomizationCreate(paymentCustomization: $input) {
    paymentCustomization {
      id
    }
    userErrors {
      message
    }
  }
}"#;

const UPDATE_PAYMENT_CUSTOMIZATION: &str = r#"
mutation updatePaymentCustomization($id: ID!, $input: PaymentCustomizationInput!) {
  paymentCustomizationUpdate(id: $id, paymentCustomization: $input) {
    paymentCustomization {
      id
    }
    userErrors {
      message
    }
  }
}"#;

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetData {
    payment_customization: Option<CustomizationNode>,
}

#[derive(Deserialize)]
struct CustomizationNode {
    id: String,
    metafield: Option<MetafieldNode>,
}

#[derive(Deserialize)]
struct MetafieldNode {
    value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    payment_customization_create: Option<MutationPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    payment_customization_update: Option<MutationPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationPayload {
    payment_customization: Option<IdNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
struct IdNode {
    id: String,
}

impl From<MutationPayload> for MutationOutcome {
    fn from(payload: MutationPayload) -> Self {
        Self {
            customization_id: payload.payment_customization.map(|node| node.id),
            user_errors: payload.user_errors,
        }
    }
}

/// Admin GraphQL API client authenticated with a shop access token.
#[derive(Clone)]
pub struct AdminGraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminGraphqlClient {
    /// Creates a client for `{admin_url}/admin/api/{api_version}/graphql.json`.
    pub fn new(admin_url: &Url, api_version: &str, access_token: impl Into<String>) -> Self {
        let endpoint = format!(
            "{}/admin/api/{}/graphql.json",
            admin_url.as_str().trim_end_matches('/'),
            api_version
        );
        Self {
            http: reqwest::Client::new(),
            endpoint,
            access_token: access_token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        debug!(endpoint = %self.endpoint, "Sending admin GraphQL request");
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CustomizationError::Http { status, body });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(CustomizationError::GraphQl(messages.join("; ")));
        }
        body.data
            .ok_or_else(|| CustomizationError::GraphQl("response contains no data".to_string()))
    }
}

fn existing_gid(id: &CustomizationId) -> Result<String> {
    id.gid().ok_or_else(|| {
        CustomizationError::GraphQl("customization has not been created yet".to_string())
    })
}

#[async_trait]
impl PaymentCustomizationApi for AdminGraphqlClient {
    async fn get(&self, id: &CustomizationId) -> Result<Option<PaymentCustomization>> {
        let data: GetData = self
            .execute(GET_PAYMENT_CUSTOMIZATION, json!({ "id": existing_gid(id)? }))
            .await?;

        Ok(data
            .payment_customization
            .map(|node| PaymentCustomization {
                id: node.id,
                metafield_value: node.metafield.map(|m| m.value),
            }))
    }

    async fn create(&self, input: PaymentCustomizationInput) -> Result<MutationOutcome> {
        let data: CreateData = self
            .execute(CREATE_PAYMENT_CUSTOMIZATION, json!({ "input": input }))
            .await?;

        data.payment_customization_create
            .map(MutationOutcome::from)
            .ok_or_else(|| {
                CustomizationError::GraphQl("paymentCustomizationCreate returned null".to_string())
            })
    }

    async fn update(
        &self,
        id: &CustomizationId,
        input: PaymentCustomizationInput,
    ) -> Result<MutationOutcome> {
        let data: UpdateData = self
            .execute(
                UPDATE_PAYMENT_CUSTOMIZATION,
                json!({ "id": existing_gid(id)?, "input": input }),
            )
            .await?;

        data.payment_customization_update
            .map(MutationOutcome::from)
            .ok_or_else(|| {
                CustomizationError::GraphQl("paymentCustomizationUpdate returned null".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_versioned() {
        let url = Url::parse("https://demo.myshopify.com/").unwrap();
        let client = AdminGraphqlClient::new(&url, "2023-07", "token");
        assert_eq!(
            client.endpoint(),
            "https://demo.myshopify.com/admin/api/2023-07/graphql.json"
        );
    }

    #[test]
    fn test_mutation_payload_conversion() {
        let payload: MutationPayload = serde_json::from_value(json!({
            "paymentCustomization": null,
            "userErrors": [{ "message": "Function not found." }]
        }))
        .unwrap();

        let outcome = MutationOutcome::from(payload);
        assert_eq!(outcome.customization_id, None);
        assert_eq!(outcome.user_errors, vec![UserError::new("Function not found.")]);
    }
}
