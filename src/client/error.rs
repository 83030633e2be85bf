//! Client Error Types
//!
//! Three families of failure reach callers:
//!
//! - **missing session** (`MissingSession`, `MissingSigningKey`): detected
//!   locally, nothing was sent;
//! - **network / backend** (`Network`, `Api`, `Decode`): the request failed
//!   or came back unusable;
//! - **auth-invalid** (`Unauthorized`, `InvalidToken`): the credential is no
//!   longer good and the local session has been cleared.
//!
//! None of them is retried.

use thiserror::Error;

use crate::shared::config::ConfigError;
use crate::shared::error::SharedError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no active session")]
    MissingSession,

    #[error("no token signing key configured")]
    MissingSigningKey,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("request failed: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Errors that must send the user back to the login route
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingSession | Self::Unauthorized | Self::InvalidToken(_)
        )
    }

    /// Short text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingSession | Self::Unauthorized | Self::InvalidToken(_) => {
                "Your session has ended. Please log in again.".to_string()
            }
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Api { status: 404, .. } => "Not found".to_string(),
            Self::Api { status: 409, message } => message.clone(),
            Self::Validation(SharedError::ValidationError { message, .. }) => message.clone(),
            _ => "Something went wrong".to_string(),
        }
    }
}
