//! Router-level tests exercising the relay endpoints with stubbed providers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use videogen_service::config::{DefaultsConfig, ReplicateConfig, SecretConfig, VideogenConfig};
use videogen_service::services::providers::mock::MockPredictionClient;
use videogen_service::services::secrets::{SecretError, SecretProvider, StaticSecretProvider};
use videogen_service::startup::{build_router, AppState};

fn test_config() -> VideogenConfig {
    VideogenConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        secret: SecretConfig {
            project_id: "test-project".to_string(),
            name: "replicate-api-token".to_string(),
        },
        replicate: ReplicateConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            model: "wan-video/wan-2.2-i2v-fast".to_string(),
        },
        defaults: DefaultsConfig {
            resolution: "480p".to_string(),
        },
    }
}

fn state_with(predictions: Arc<MockPredictionClient>) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        secrets: Arc::new(StaticSecretProvider::new("test-token")),
        predictions,
    }
}

/// Secret provider whose fetch always fails.
struct FailingSecretProvider;

#[async_trait]
impl SecretProvider for FailingSecretProvider {
    async fn fetch(&self) -> Result<Secret<String>, SecretError> {
        Err(SecretError::Api("secret store unavailable".to_string()))
    }
}

async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn create_video_without_prompt_returns_400_and_no_remote_call() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(
        state_with(mock.clone()),
        "/api/createVideo?imageUrl=https%3A%2F%2Fexample.com%2Fcat.png",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prompt"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn create_video_without_image_url_returns_400() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(state_with(mock.clone()), "/api/createVideo?prompt=a+cat").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("imageUrl"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn create_video_without_any_params_returns_400() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(state_with(mock.clone()), "/api/createVideo").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn create_video_relays_remote_task_id() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(
        state_with(mock.clone()),
        "/api/createVideo?prompt=a+cat+surfing&imageUrl=https%3A%2F%2Fexample.com%2Fcat.png",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskId"], "pred-abc123");
    assert_eq!(body["status"], "started");
    assert!(body["message"].is_string());
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn create_video_applies_default_resolution() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    get_json(
        state_with(mock.clone()),
        "/api/createVideo?prompt=a+cat&imageUrl=https%3A%2F%2Fexample.com%2Fcat.png",
    )
    .await;

    let input = mock.last_input().expect("no prediction input recorded");
    assert_eq!(input.resolution, "480p");
    assert_eq!(input.prompt, "a cat");
    assert_eq!(input.image_url, "https://example.com/cat.png");
}

#[tokio::test]
async fn create_video_passes_explicit_resolution_through() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    get_json(
        state_with(mock.clone()),
        "/api/createVideo?prompt=a+cat&imageUrl=https%3A%2F%2Fexample.com%2Fcat.png&resolution=720p",
    )
    .await;

    let input = mock.last_input().expect("no prediction input recorded");
    assert_eq!(input.resolution, "720p");
}

#[tokio::test]
async fn check_status_without_task_id_returns_400() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(state_with(mock.clone()), "/api/checkStatus").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("taskId"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn check_status_succeeded_includes_output_url_only() {
    let mock = Arc::new(MockPredictionClient::with_status(
        "succeeded",
        Some(json!("https://cdn.example.com/video.mp4")),
        None,
    ));
    let (status, body) = get_json(state_with(mock), "/api/checkStatus?taskId=pred-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskId"], "pred-42");
    assert_eq!(body["status"], "succeeded");
    assert_eq!(body["output_url"], "https://cdn.example.com/video.mp4");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn check_status_failed_is_200_with_error_only() {
    let mock = Arc::new(MockPredictionClient::with_status(
        "failed",
        None,
        Some("generation failed: invalid image".to_string()),
    ));
    let (status, body) = get_json(state_with(mock), "/api/checkStatus?taskId=pred-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "generation failed: invalid image");
    assert!(body.get("output_url").is_none());
}

#[tokio::test]
async fn check_status_processing_has_neither_output_nor_error() {
    let mock = Arc::new(MockPredictionClient::with_status("processing", None, None));
    let (status, body) = get_json(state_with(mock), "/api/checkStatus?taskId=pred-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");
    assert!(body.get("output_url").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn upstream_failure_returns_500_with_details() {
    let mock = Arc::new(MockPredictionClient::failing("Replicate API error 401: unauthorized"));
    let (status, body) = get_json(
        state_with(mock),
        "/api/createVideo?prompt=a+cat&imageUrl=https%3A%2F%2Fexample.com%2Fcat.png",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("unauthorized"));
}

#[tokio::test]
async fn secret_failure_returns_500_and_skips_prediction_call() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let state = AppState {
        config: Arc::new(test_config()),
        secrets: Arc::new(FailingSecretProvider),
        predictions: mock.clone(),
    };
    let (status, body) = get_json(
        state,
        "/api/createVideo?prompt=a+cat&imageUrl=https%3A%2F%2Fexample.com%2Fcat.png",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("secret store unavailable"));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_endpoint_makes_no_provider_calls() {
    let mock = Arc::new(MockPredictionClient::with_status("starting", None, None));
    let (status, body) = get_json(state_with(mock.clone()), "/api/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskId"], "test-1116");
    assert_eq!(body["status"], "succeeded");
    assert_eq!(mock.calls(), 0);
}
