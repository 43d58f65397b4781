use crate::services::providers::Prediction;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/createVideo`.
///
/// Required fields are `Option` so the handler can return the documented 400
/// body instead of axum's default query rejection.
#[derive(Debug, Deserialize)]
pub struct CreateVideoParams {
    pub prompt: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub resolution: Option<String>,
}

/// Query parameters for `GET /api/checkStatus`.
#[derive(Debug, Deserialize)]
pub struct CheckStatusParams {
    #[serde(rename = "taskId")]
    pub task_id: Option<String>,
}

/// Response for a newly created generation task.
#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub status: &'static str,
    pub message: String,
}

/// Momentary snapshot of a remote generation task, as relayed to the caller.
///
/// `output_url` appears only for succeeded tasks, `error` only for failed
/// ones; the status vocabulary itself is owned by the remote API.
#[derive(Debug, Serialize)]
pub struct TaskStatus {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Prediction> for TaskStatus {
    fn from(prediction: Prediction) -> Self {
        let succeeded = prediction.status == "succeeded";
        let failed = prediction.status == "failed";

        TaskStatus {
            output_url: if succeeded {
                prediction.output.as_ref().and_then(first_output_url)
            } else {
                None
            },
            error: if failed { prediction.error } else { None },
            task_id: prediction.id,
            status: prediction.status,
            created_at: prediction.created_at,
            started_at: prediction.started_at,
            completed_at: prediction.completed_at,
            model: prediction.model,
        }
    }
}

/// Replicate models report output as either a single URL or a list of URLs.
fn first_output_url(output: &serde_json::Value) -> Option<String> {
    match output {
        serde_json::Value::String(url) => Some(url.clone()),
        serde_json::Value::Array(items) => {
            items.iter().find_map(|v| v.as_str().map(str::to_owned))
        }
        _ => None,
    }
}
