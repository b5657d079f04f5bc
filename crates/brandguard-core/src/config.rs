use url::Url;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub(crate) const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws/mentions";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a local-development default, so the only failure mode
/// is a value that does not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_url = |var: &str, default: &str, schemes: &[&str]| -> Result<Url, ConfigError> {
        let raw = or_default(var, default);
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !schemes.contains(&url.scheme()) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!(
                    "unsupported scheme '{}', expected one of {}",
                    url.scheme(),
                    schemes.join("/")
                ),
            });
        }
        Ok(url)
    };

    let env = parse_environment(&or_default("BRANDGUARD_ENV", "development"));
    let api_base = parse_url("BRANDGUARD_API_URL", DEFAULT_API_URL, &["http", "https"])?;
    let ws_base = parse_url("BRANDGUARD_WS_URL", DEFAULT_WS_URL, &["ws", "wss"])?;
    let log_level = or_default("BRANDGUARD_LOG_LEVEL", "info");
    let user_agent = or_default("BRANDGUARD_USER_AGENT", "brandguard/0.1 (live-dashboard)");

    Ok(AppConfig {
        env,
        api_base,
        ws_base,
        log_level,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
