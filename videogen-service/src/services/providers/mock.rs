//! Mock prediction client for testing.

use super::{Prediction, PredictionClient, PredictionInput, ProviderError};
use async_trait::async_trait;
use secrecy::Secret;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted prediction client: returns a canned record (or error) and
/// records how it was called.
pub struct MockPredictionClient {
    outcome: Result<Prediction, String>,
    calls: AtomicUsize,
    last_input: Mutex<Option<PredictionInput>>,
}

impl MockPredictionClient {
    pub fn new(prediction: Prediction) -> Self {
        Self {
            outcome: Ok(prediction),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Canned prediction with the given status, output, and error.
    pub fn with_status(
        status: &str,
        output: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Self {
        Self::new(Prediction {
            id: "pred-abc123".to_string(),
            status: status.to_string(),
            model: "mock-model".to_string(),
            created_at: Some("2025-11-16T10:00:00Z".to_string()),
            started_at: Some("2025-11-16T10:00:05Z".to_string()),
            completed_at: None,
            output,
            error,
        })
    }

    /// Client whose every call fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Number of prediction calls made against this client.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Input of the most recent `create_prediction` call, if any.
    pub fn last_input(&self) -> Option<PredictionInput> {
        self.last_input.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<Prediction, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(prediction) => Ok(prediction.clone()),
            Err(message) => Err(ProviderError::Api(message.clone())),
        }
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn create_prediction(
        &self,
        _token: &Secret<String>,
        model: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ProviderError> {
        *self.last_input.lock().unwrap() = Some(input.clone());
        let mut prediction = self.outcome()?;
        prediction.model = model.to_string();
        Ok(prediction)
    }

    async fn get_prediction(
        &self,
        _token: &Secret<String>,
        id: &str,
    ) -> Result<Prediction, ProviderError> {
        let mut prediction = self.outcome()?;
        prediction.id = id.to_string();
        Ok(prediction)
    }
}
