use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The relay holds no state, so there is nothing to check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "videogen-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Canned succeeded-task payload for client development. Never touches the
/// secret store or the prediction API.
pub async fn test_response() -> impl IntoResponse {
    Json(json!({
        "taskId": "test-1116",
        "status": "succeeded",
        "output_url": "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
        "message": "This is a test response",
    }))
}
