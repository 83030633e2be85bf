/**
 * Authentication Module
 *
 * Login, registration, logout and credential introspection against the
 * backend's auth endpoints.
 */

use reqwest::Method;

use crate::client::error::ClientError;
use crate::client::gate::Introspect;
use crate::client::http::ApiClient;
use crate::client::session::SessionRecord;
use crate::shared::feed::{IntrospectResult, RegisterRequest, TokenResult, UserProfile};
use crate::shared::validation;

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and persist a fresh session.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionRecord, ClientError> {
        let request = validation::login(username, password)?;

        let builder = self.client.request(Method::POST, "/auth/token")?.json(&request);
        let result: TokenResult = match self.client.send(builder).await {
            Ok(result) => result,
            Err(ClientError::Unauthorized) => {
                tracing::info!(%username, "login rejected");
                return Err(ClientError::Api {
                    status: 401,
                    message: "Invalid username or password".to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        if result.token.is_empty() || result.authenticated == Some(false) {
            return Err(ClientError::Api {
                status: 401,
                message: "Invalid username or password".to_string(),
            });
        }

        let record = self.client.session().establish(result.token)?;
        tracing::info!(%username, "logged in");
        Ok(record)
    }

    /// Ask the backend whether the stored token is still valid.
    pub async fn introspect(&self) -> Result<bool, ClientError> {
        let builder = self.client.authed(Method::GET, "/auth/introspect")?;
        let result: IntrospectResult = self.client.send(builder).await?;
        tracing::debug!(valid = result.valid, "introspection");
        Ok(result.valid)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<UserProfile>, ClientError> {
        validation::register(request, chrono::Local::now().date_naive())?;
        let builder = self.client.request(Method::POST, "/users")?.json(request);
        let created = self.client.send_optional(builder).await?;
        tracing::info!(username = %request.username, "registered");
        Ok(created)
    }

    /// End the session. The local record is gone afterwards whatever the
    /// backend answers.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let outcome = match self.client.request(Method::POST, "/users/logout") {
            Ok(builder) => self
                .client
                .send_optional::<serde_json::Value>(builder)
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "logout request failed");
        }

        self.client.session().clear()?;
        tracing::info!("logged out");
        outcome
    }
}

impl Introspect for AuthApi {
    async fn introspect(&self) -> Result<bool, ClientError> {
        AuthApi::introspect(self).await
    }
}
