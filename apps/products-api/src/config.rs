//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_optional, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where the product routes are mounted below `/api` unless `PRODUCTS_PATH` says otherwise
pub const DEFAULT_PRODUCTS_PATH: &str = "/products";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Mount path of the product routes, always with a leading `/`
    pub products_path: String,
    /// Comma-separated allowed origins; `None` allows any origin
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let products_path = mount_path(&env_or_default("PRODUCTS_PATH", DEFAULT_PRODUCTS_PATH))?;
        let cors_allowed_origin = env_optional("CORS_ALLOWED_ORIGIN");

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            environment,
            products_path,
            cors_allowed_origin,
        })
    }
}

/// Normalize a mount path to `/segment[/segment...]` without a trailing slash.
fn mount_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_matches('/');

    if trimmed.is_empty() || trimmed.contains(['{', '}', '*']) {
        return Err(ConfigError::ParseError {
            key: "PRODUCTS_PATH".to_string(),
            details: format!("'{}' is not a usable mount path", raw),
        });
    }

    Ok(format!("/{}", trimmed))
}
