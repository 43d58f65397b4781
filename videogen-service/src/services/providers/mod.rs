//! Prediction API client abstraction.
//!
//! A trait-based seam over the remote generation API so the relay can be
//! exercised against a mock backend in tests.

pub mod mock;
pub mod replicate;

use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

/// Error type for prediction API operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Snapshot of a remote prediction as the API reports it.
///
/// The status vocabulary (`starting`, `processing`, `succeeded`, `failed`)
/// belongs to the remote service and is passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Input to a new image-to-video prediction.
#[derive(Debug, Clone)]
pub struct PredictionInput {
    pub prompt: String,
    pub image_url: String,
    pub resolution: String,
}

#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Start a generation job; returns the remote record with its assigned id.
    async fn create_prediction(
        &self,
        token: &Secret<String>,
        model: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ProviderError>;

    /// Fetch the current state of a job.
    async fn get_prediction(
        &self,
        token: &Secret<String>,
        id: &str,
    ) -> Result<Prediction, ProviderError>;
}
