//! Replicate prediction API client.

use super::{Prediction, PredictionClient, PredictionInput, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

pub struct ReplicateClient {
    client: Client,
    base_url: String,
}

impl ReplicateClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePredictionRequest<'a> {
    input: InputPayload<'a>,
}

#[derive(Debug, Serialize)]
struct InputPayload<'a> {
    prompt: &'a str,
    image: &'a str,
    resolution: &'a str,
}

#[async_trait]
impl PredictionClient for ReplicateClient {
    async fn create_prediction(
        &self,
        token: &Secret<String>,
        model: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ProviderError> {
        let url = format!("{}/v1/models/{}/predictions", self.base_url, model);
        let request = CreatePredictionRequest {
            input: InputPayload {
                prompt: &input.prompt,
                image: &input.image_url,
                resolution: &input.resolution,
            },
        };

        tracing::debug!(
            model,
            prompt_len = input.prompt.len(),
            resolution = %input.resolution,
            "Creating prediction"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Replicate API error {}: {}",
                status, error_text
            )));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(prediction)
    }

    async fn get_prediction(
        &self,
        token: &Secret<String>,
        id: &str,
    ) -> Result<Prediction, ProviderError> {
        let url = format!("{}/v1/predictions/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Replicate API error {}: {}",
                status, error_text
            )));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(prediction)
    }
}
