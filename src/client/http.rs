//! Shared HTTP plumbing for the API clients.
//!
//! Builds requests against the configured backend, attaches the session
//! token, unwraps the `{ result }` envelope and maps failures onto
//! [`ClientError`]. A 401 from any endpoint clears the local session.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::client::session::SessionContext;
use crate::shared::feed::{ApiResponse, ErrorBody};

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    http: Client,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(config: Config, session: Arc<SessionContext>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self {
            config,
            http,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Request that carries the session token when there is one.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let builder = self.http.request(method, self.config.api_url(path));
        Ok(match self.session.token()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Request that needs a session. Without one it fails before anything
    /// is sent.
    pub fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let record = self.session.require()?;
        Ok(self
            .http
            .request(method, self.config.api_url(path))
            .bearer_auth(record.token))
    }

    /// Send and return the envelope's `result`, which must be present.
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        self.send_optional(builder)
            .await?
            .ok_or_else(|| ClientError::Decode("response has no result".to_string()))
    }

    /// Send and return the envelope's `result`, if any. An empty body is
    /// `None`.
    pub async fn send_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = self.execute(builder).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let envelope: ApiResponse<T> =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(envelope.into_result())
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!(%method, %url, error = %e, "request failed");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| if text.is_empty() { status.to_string() } else { text });

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, %url, "credentials rejected, clearing session");
            if let Err(e) = self.session.clear() {
                tracing::warn!(error = %e, "could not clear session");
            }
            return Err(ClientError::Unauthorized);
        }

        tracing::error!(%method, %url, status = status.as_u16(), %message, "backend error");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
