//! Shared Module
//!
//! Types that do not depend on the client runtime: wire payloads, form
//! validation, configuration and the shared error type.

/// Backend wire types
pub mod feed;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Route names
pub mod routes;

/// Form validation
pub mod validation;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use feed::{Post, UserProfile};
