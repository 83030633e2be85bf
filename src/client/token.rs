//! Bearer token codec
//!
//! The backend issues HMAC-signed JWTs carrying a `userId` claim. The client
//! verifies the signature with the shared signing key and reads the claim;
//! it never interprets anything else in the token.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::shared::feed::de;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(rename = "userId", default, deserialize_with = "de::optional_id")]
    user_id: Option<String>,
}

#[derive(Clone, Default)]
pub struct TokenCodec {
    key: Option<Vec<u8>>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TokenCodec {
    pub fn new(key: Option<&str>) -> Self {
        Self {
            key: key.map(|k| k.as_bytes().to_vec()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.signing_key())
    }

    /// Verify `token` and return its `userId` claim.
    pub fn user_id(&self, token: &str) -> Result<String, ClientError> {
        let key = self.key.as_deref().ok_or(ClientError::MissingSigningKey)?;

        let header = decode_header(token).map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        if !matches!(header.alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ClientError::InvalidToken(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }

        let data = decode::<Claims>(token, &DecodingKey::from_secret(key), &Validation::new(header.alg))
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                ClientError::InvalidToken(e.to_string())
            })?;

        data.claims
            .user_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ClientError::InvalidToken("missing userId claim".to_string()))
    }
}
