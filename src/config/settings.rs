//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_ENVIRONMENT, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, PRODUCTION_ENVIRONMENT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Allowed CORS origin(s): `*` or a comma-separated list
    pub cors_origin: String,
    /// Take the client address from forwarding headers
    pub trust_proxy: bool,
    pub max_body_bytes: usize,
    pub environment: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_origin", &self.cors_origin)
            .field("trust_proxy", &self.trust_proxy)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numeric or boolean values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_origin: env::var("FRONTEND_URL")
                .or_else(|_| env::var("CORS_ORIGIN"))
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            trust_proxy: env::var("TRUST_PROXY")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            environment: env::var("APP_ENV")
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
        }
    }

    /// Whether the process runs in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case(PRODUCTION_ENVIRONMENT)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            trust_proxy: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
