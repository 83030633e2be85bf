use std::path::PathBuf;
use std::time::Duration;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, ENV_CONFIG_FILE};

/// Client configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Defaults, then the file named by `FEED_CONFIG`, then `FEED_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
            builder = builder.merge_toml_file(&PathBuf::from(path))?;
        }
        Self::with_builder(builder.apply_env()?)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Shortcut for tests and embedders pointing at a known backend
    pub fn for_server(url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().server_url(url))
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url(), path)
        } else {
            format!("{}/{}", self.server_url(), path)
        }
    }

    pub fn server_url(&self) -> &str {
        &self.app.server_url
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn session_ttl(&self) -> Duration {
        self.app.session_ttl
    }

    pub fn session_key(&self) -> &str {
        &self.app.session_key
    }

    pub fn signing_key(&self) -> Option<&str> {
        self.app.jwt_signing_key.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.app.request_timeout
    }

    pub fn login_route(&self) -> &str {
        &self.app.login_route
    }

    pub fn home_route(&self) -> &str {
        &self.app.home_route
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.app.is_public(path)
    }

    /// Where file-backed session storage lives
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.app
            .session_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("socialfeed")))
    }
}
