use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Resolution requested when the caller does not specify one.
const DEFAULT_RESOLUTION: &str = "480p";

#[derive(Debug, Clone, Deserialize)]
pub struct VideogenConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub secret: SecretConfig,
    pub replicate: ReplicateConfig,
    pub defaults: DefaultsConfig,
}

/// Where the prediction API credential lives in Secret Manager.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    pub project_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplicateConfig {
    pub base_url: String,
    /// Image-to-video model identifier (e.g. wan-video/wan-2.2-i2v-fast)
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    pub resolution: String,
}

impl VideogenConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(VideogenConfig {
            common,
            secret: SecretConfig {
                project_id: get_env("GCP_PROJECT_ID", Some("local-dev"), is_prod)?,
                name: get_env("SECRET_NAME", Some("replicate-api-token"), is_prod)?,
            },
            replicate: ReplicateConfig {
                base_url: get_env(
                    "REPLICATE_BASE_URL",
                    Some("https://api.replicate.com"),
                    is_prod,
                )?,
                model: get_env("VIDEOGEN_MODEL", Some("wan-video/wan-2.2-i2v-fast"), is_prod)?,
            },
            defaults: DefaultsConfig {
                resolution: get_env(
                    "VIDEOGEN_DEFAULT_RESOLUTION",
                    Some(DEFAULT_RESOLUTION),
                    is_prod,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
