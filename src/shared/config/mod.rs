//! Application configuration module
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! then `FEED_*` environment variables.
//!
//! ```toml
//! server_url = "https://feed.example.com/api"
//! session_ttl_secs = 3600
//! public_routes = ["/login", "/register"]
//! jwt_signing_key = "..."
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::shared::routes;

/// Default backend URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
/// Default session lifetime
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
/// Longest session lifetime accepted
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);
/// Default storage key of the session record
pub const DEFAULT_SESSION_KEY: &str = "user";
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable naming a TOML config file
pub const ENV_CONFIG_FILE: &str = "FEED_CONFIG";
/// Environment variable overriding the backend URL
pub const ENV_API_URL: &str = "FEED_API_URL";
/// Environment variable carrying the token signing key
pub const ENV_SIGNING_KEY: &str = "FEED_JWT_SIGNED_KEY";
/// Environment variable overriding the session TTL, in seconds
pub const ENV_SESSION_TTL: &str = "FEED_SESSION_TTL_SECS";
/// Environment variable overriding the session storage directory
pub const ENV_SESSION_DIR: &str = "FEED_SESSION_DIR";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub server_url: String,
    /// Lifetime of a freshly created session record
    pub session_ttl: Duration,
    /// Routes the auth gate lets through without checking
    pub public_routes: Vec<String>,
    /// Where refused navigation is sent
    pub login_route: String,
    /// Where a successful login lands
    pub home_route: String,
    /// Storage key of the serialized session record
    pub session_key: String,
    /// HMAC key used to read the user id out of the bearer token
    pub jwt_signing_key: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Directory for file-backed session storage
    pub session_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session_ttl: DEFAULT_SESSION_TTL,
            public_routes: routes::DEFAULT_PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect(),
            login_route: routes::LOGIN.to_string(),
            home_route: routes::HOME.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            jwt_signing_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            session_dir: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.server_url.clone()));
        }
        if self.session_ttl.is_zero() {
            return Err(ConfigError::invalid("session_ttl", "must be greater than zero"));
        }
        if self.session_ttl > MAX_SESSION_TTL {
            return Err(ConfigError::invalid(
                "session_ttl",
                format!("must be at most {} seconds", MAX_SESSION_TTL.as_secs()),
            ));
        }
        if self.session_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("session_key"));
        }
        if !self.is_public(&self.login_route) {
            return Err(ConfigError::invalid(
                "login_route",
                format!("{} must be one of the public routes", self.login_route),
            ));
        }
        Ok(())
    }

    /// Whether `path` is on the public allowlist
    pub fn is_public(&self, path: &str) -> bool {
        let path = routes::normalize(path);
        self.public_routes.iter().any(|r| routes::normalize(r) == path)
    }
}

/// Shape of the TOML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub session_ttl_secs: Option<u64>,
    pub public_routes: Option<Vec<String>>,
    pub login_route: Option<String>,
    pub home_route: Option<String>,
    pub session_key: Option<String>,
    pub jwt_signing_key: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub session_dir: Option<PathBuf>,
}

/// Builder for AppConfig
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    session_ttl: Option<Duration>,
    public_routes: Option<Vec<String>>,
    login_route: Option<String>,
    home_route: Option<String>,
    session_key: Option<String>,
    jwt_signing_key: Option<String>,
    request_timeout: Option<Duration>,
    session_dir: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    pub fn public_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_routes = Some(routes.into_iter().map(Into::into).collect());
        self
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = Some(route.into());
        self
    }

    pub fn home_route(mut self, route: impl Into<String>) -> Self {
        self.home_route = Some(route.into());
        self
    }

    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    pub fn jwt_signing_key(mut self, key: impl Into<String>) -> Self {
        self.jwt_signing_key = Some(key.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Layer values from a parsed config file; values already set win.
    pub fn merge_file(mut self, file: FileConfig) -> Self {
        self.server_url = self.server_url.or(file.server_url);
        self.session_ttl = self.session_ttl.or(file.session_ttl_secs.map(Duration::from_secs));
        self.public_routes = self.public_routes.or(file.public_routes);
        self.login_route = self.login_route.or(file.login_route);
        self.home_route = self.home_route.or(file.home_route);
        self.session_key = self.session_key.or(file.session_key);
        self.jwt_signing_key = self.jwt_signing_key.or(file.jwt_signing_key);
        self.request_timeout = self
            .request_timeout
            .or(file.request_timeout_secs.map(Duration::from_secs));
        self.session_dir = self.session_dir.or(file.session_dir);
        self
    }

    /// Layer values from TOML text
    pub fn merge_toml(self, text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(text)?;
        Ok(self.merge_file(file))
    }

    /// Layer values from a TOML file on disk
    pub fn merge_toml_file(self, path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&text)
    }

    /// Apply `FEED_*` environment overrides. Environment beats everything
    /// set so far.
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.server_url = Some(url);
        }
        if let Ok(key) = std::env::var(ENV_SIGNING_KEY) {
            self.jwt_signing_key = Some(key);
        }
        if let Ok(ttl) = std::env::var(ENV_SESSION_TTL) {
            let secs = ttl
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("session_ttl", format!("{}: {}", ttl, e)))?;
            self.session_ttl = Some(Duration::from_secs(secs));
        }
        if let Ok(dir) = std::env::var(ENV_SESSION_DIR) {
            self.session_dir = Some(PathBuf::from(dir));
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_url: self
                .server_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.server_url),
            session_ttl: self.session_ttl.unwrap_or(defaults.session_ttl),
            public_routes: self.public_routes.unwrap_or(defaults.public_routes),
            login_route: self.login_route.unwrap_or(defaults.login_route),
            home_route: self.home_route.unwrap_or(defaults.home_route),
            session_key: self.session_key.unwrap_or(defaults.session_key),
            jwt_signing_key: self.jwt_signing_key.filter(|k| !k.is_empty()),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            session_dir: self.session_dir,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
