use service_core::observability::init_tracing;
use std::sync::Arc;
use videogen_service::config::VideogenConfig;
use videogen_service::services::providers::replicate::ReplicateClient;
use videogen_service::services::secrets::GoogleSecretProvider;
use videogen_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("videogen-service", "info");

    let config = VideogenConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let secrets = Arc::new(GoogleSecretProvider::new(
        &config.secret.project_id,
        &config.secret.name,
    ));
    let predictions = Arc::new(ReplicateClient::new(&config.replicate.base_url));

    tracing::info!(
        model = %config.replicate.model,
        secret = %config.secret.name,
        "Initialized Replicate prediction client"
    );

    let app = Application::build(config, secrets, predictions)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build application: {}", e);
            anyhow::anyhow!("Startup error: {}", e)
        })?;

    tracing::info!("videogen-service listening on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
