//! Secret store access.
//!
//! The relay authenticates to the prediction API with a credential held in
//! Google Secret Manager. The provider is injected as a trait object so
//! tests and local development substitute a static value.

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const SECRET_MANAGER_BASE: &str = "https://secretmanager.googleapis.com/v1";

/// Error type for secret store operations.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret store request failed: {0}")]
    Network(String),

    #[error("Secret store rejected the request: {0}")]
    Api(String),

    #[error("Secret payload was not valid: {0}")]
    InvalidPayload(String),
}

/// One operation: fetch the current value of the configured secret.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn fetch(&self) -> Result<Secret<String>, SecretError>;
}

/// Secret Manager client using the GCE metadata server for auth.
pub struct GoogleSecretProvider {
    client: Client,
    project_id: String,
    secret_name: String,
    cached: OnceCell<Secret<String>>,
}

impl GoogleSecretProvider {
    pub fn new(project_id: &str, secret_name: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            project_id: project_id.to_string(),
            secret_name: secret_name.to_string(),
            cached: OnceCell::new(),
        }
    }

    async fn access_token(&self) -> Result<String, SecretError> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let response = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| SecretError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SecretError::Api(format!(
                "metadata server returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SecretError::InvalidPayload(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn fetch_fresh(&self) -> Result<Secret<String>, SecretError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/projects/{}/secrets/{}/versions/latest:access",
            SECRET_MANAGER_BASE, self.project_id, self.secret_name
        );

        tracing::debug!(secret = %self.secret_name, "Fetching secret from Secret Manager");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SecretError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SecretError::Api(format!(
                "Secret Manager error {}: {}",
                status, body
            )));
        }

        #[derive(Deserialize)]
        struct AccessResponse {
            payload: Payload,
        }

        #[derive(Deserialize)]
        struct Payload {
            data: String,
        }

        let body: AccessResponse = response
            .json()
            .await
            .map_err(|e| SecretError::InvalidPayload(e.to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body.payload.data)
            .map_err(|e| SecretError::InvalidPayload(e.to_string()))?;
        let value =
            String::from_utf8(bytes).map_err(|e| SecretError::InvalidPayload(e.to_string()))?;

        Ok(Secret::new(value))
    }
}

#[async_trait]
impl SecretProvider for GoogleSecretProvider {
    async fn fetch(&self) -> Result<Secret<String>, SecretError> {
        // Fetched once per process lifetime; there is no rotation handling.
        self.cached
            .get_or_try_init(|| self.fetch_fresh())
            .await
            .map(|secret| secret.clone())
    }
}

/// Fixed-value provider for tests and local development.
pub struct StaticSecretProvider {
    value: Secret<String>,
}

impl StaticSecretProvider {
    pub fn new(value: &str) -> Self {
        Self {
            value: Secret::new(value.to_string()),
        }
    }
}

#[async_trait]
impl SecretProvider for StaticSecretProvider {
    async fn fetch(&self) -> Result<Secret<String>, SecretError> {
        Ok(self.value.clone())
    }
}
