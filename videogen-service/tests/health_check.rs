//! End-to-end tests against a spawned server.
//!
//! Run with: cargo test -p videogen-service --test health_check

use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use videogen_service::config::VideogenConfig;
use videogen_service::services::providers::mock::MockPredictionClient;
use videogen_service::services::secrets::StaticSecretProvider;
use videogen_service::startup::Application;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0"); // Random port

    let config = VideogenConfig::load().expect("Failed to load config");
    let secrets = Arc::new(StaticSecretProvider::new("test-token"));
    let predictions = Arc::new(MockPredictionClient::with_status(
        "succeeded",
        Some(json!("https://cdn.example.com/video.mp4")),
        None,
    ));

    let app = Application::build(config, secrets, predictions)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok_with_parseable_timestamp() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "videogen-service");

    let timestamp = body["timestamp"].as_str().expect("timestamp missing");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_endpoint_returns_fixed_payload() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/test", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({
            "taskId": "test-1116",
            "status": "succeeded",
            "output_url": "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
            "message": "This is a test response",
        })
    );
}
