//! Service configuration loaded from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Prefix of every environment variable read by [`ServiceConfig::from_env`]
pub const ENV_PREFIX: &str = "JOBBOARD";

/// Storage backend for users and jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL, configured through `DATABASE_*` variables
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// API service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Frontend origin, used for CORS and post-login redirects
    pub client_url: String,
    /// Prefix every API route is mounted under
    pub api_prefix: String,
    /// Name of the cookie carrying the session token
    pub session_cookie: String,
    /// HS256 secret shared with the identity provider integration
    pub session_secret: String,
    /// Expected `iss` claim, if any
    pub session_issuer: Option<String>,
    /// Expected `aud` claim, if any
    pub session_audience: Option<String>,
    pub storage: StorageBackend,
}

impl ServiceConfig {
    /// Load the configuration from `JOBBOARD_*` environment variables
    ///
    /// # Environment Variables
    /// - `JOBBOARD_HOST` (default: "0.0.0.0")
    /// - `JOBBOARD_PORT` (default: 3001)
    /// - `JOBBOARD_CLIENT_URL` (default: "http://localhost:3000")
    /// - `JOBBOARD_API_PREFIX` (default: "/api/v1")
    /// - `JOBBOARD_SESSION_COOKIE` (default: "appSession")
    /// - `JOBBOARD_SESSION_SECRET` (required)
    /// - `JOBBOARD_SESSION_ISSUER`, `JOBBOARD_SESSION_AUDIENCE` (optional)
    /// - `JOBBOARD_STORAGE`: "postgres" or "memory" (default: "postgres")
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: ServiceConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001_i64)?
            .set_default("client_url", "http://localhost:3000")?
            .set_default("api_prefix", "/api/v1")?
            .set_default("session_cookie", "appSession")?
            .set_default("storage", "postgres")?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.normalized()
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn normalized(mut self) -> Result<Self, ConfigError> {
        if self.session_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "session_secret must not be empty".to_string(),
            ));
        }

        let prefix = self.api_prefix.trim().trim_end_matches('/');
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(ConfigError::Message(format!(
                "api_prefix must start with '/': {}",
                self.api_prefix
            )));
        }
        self.api_prefix = prefix.to_string();

        Ok(self)
    }
}
