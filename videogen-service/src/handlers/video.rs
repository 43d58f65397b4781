//! Relay handlers for the prediction API.
//!
//! Each handler performs at most one remote call: validate, fetch the
//! credential, invoke the prediction API, map the response. A remote task
//! that failed is still a successful relay (HTTP 200 with an `error` field).

use crate::models::task::{CheckStatusParams, CreateVideoParams, CreateVideoResponse, TaskStatus};
use crate::services::providers::PredictionInput;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use service_core::error::AppError;

/// `GET /api/createVideo` — start an image-to-video generation task.
pub async fn create_video(
    State(state): State<AppState>,
    Query(params): Query<CreateVideoParams>,
) -> Result<Json<CreateVideoResponse>, AppError> {
    let prompt = require_param(params.prompt, "prompt")?;
    let image_url = require_param(params.image_url, "imageUrl")?;
    let resolution = params
        .resolution
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| state.config.defaults.resolution.clone());

    let token = state.secrets.fetch().await.map_err(|e| {
        tracing::error!("Failed to fetch API credential: {}", e);
        AppError::Upstream {
            context: "Failed to retrieve API credential".to_string(),
            details: e.to_string(),
        }
    })?;

    let input = PredictionInput {
        prompt,
        image_url,
        resolution,
    };
    let prediction = state
        .predictions
        .create_prediction(&token, &state.config.replicate.model, &input)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create prediction: {}", e);
            AppError::Upstream {
                context: "Failed to create video generation task".to_string(),
                details: e.to_string(),
            }
        })?;

    tracing::info!(task_id = %prediction.id, status = %prediction.status, "Created generation task");

    Ok(Json(CreateVideoResponse {
        task_id: prediction.id,
        status: "started",
        message: "Video generation task created. Poll /api/checkStatus with this taskId."
            .to_string(),
    }))
}

/// `GET /api/checkStatus` — report the current snapshot of a task.
pub async fn check_status(
    State(state): State<AppState>,
    Query(params): Query<CheckStatusParams>,
) -> Result<Json<TaskStatus>, AppError> {
    let task_id = require_param(params.task_id, "taskId")?;

    let token = state.secrets.fetch().await.map_err(|e| {
        tracing::error!("Failed to fetch API credential: {}", e);
        AppError::Upstream {
            context: "Failed to retrieve API credential".to_string(),
            details: e.to_string(),
        }
    })?;

    let prediction = state
        .predictions
        .get_prediction(&token, &task_id)
        .await
        .map_err(|e| {
            tracing::error!(task_id = %task_id, "Failed to fetch prediction: {}", e);
            AppError::Upstream {
                context: "Failed to fetch task status".to_string(),
                details: e.to_string(),
            }
        })?;

    Ok(Json(TaskStatus::from(prediction)))
}

fn require_param(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(anyhow::anyhow!(
            "Missing required query parameter: {}",
            name
        ))),
    }
}
