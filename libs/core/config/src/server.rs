use crate::{env_optional, env_or_default, env_parse_or, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Port the HTTP server binds to when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3333;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL, advertised in the OpenAPI `servers` list
    pub public_url: String,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        let public_url = default_public_url(port);
        Self {
            host,
            port,
            public_url,
        }
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = public_url.into();
        self
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_public_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 3333
    /// - BASE_URL: defaults to http://localhost:{PORT}
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", DEFAULT_PORT)?;
        let public_url = env_optional("BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| default_public_url(port));

        Ok(Self {
            host,
            port,
            public_url,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}
