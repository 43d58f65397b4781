//! Application startup and lifecycle management.

use crate::config::VideogenConfig;
use crate::handlers::app::{health_check, test_response};
use crate::handlers::video::{check_status, create_video};
use crate::services::providers::PredictionClient;
use crate::services::secrets::SecretProvider;
use axum::middleware::from_fn;
use axum::{routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable for the process lifetime; the two
/// providers are injected so tests can substitute stubs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<VideogenConfig>,
    pub secrets: Arc<dyn SecretProvider>,
    pub predictions: Arc<dyn PredictionClient>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/createVideo", get(create_video))
        .route("/api/checkStatus", get(check_status))
        .route("/api/test", get(test_response))
        .route("/health", get(health_check))
        // The HTTP surface is consumed directly from browsers; allow any origin.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener and assemble the shared state.
    pub async fn build(
        config: VideogenConfig,
        secrets: Arc<dyn SecretProvider>,
        predictions: Arc<dyn PredictionClient>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let address = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config: Arc::new(config),
            secrets,
            predictions,
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
