//! Shared types and configuration for the BrandGuard dashboard client.

mod alerts;
mod app_config;
mod config;
mod mentions;

use thiserror::Error;

pub use alerts::Alert;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use mentions::{CreatedMention, Mention, NewMention, Sentiment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Deserializes a nullable JSON string, mapping `null` to the empty string.
///
/// The backend emits `null` for text columns it never populated; the model
/// treats those the same as an empty value.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
