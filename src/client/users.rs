//! User profile endpoints.

use reqwest::Method;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::client::token::TokenCodec;
use crate::shared::feed::{sort_newest_first, UpdateProfileRequest, UserProfile};

#[derive(Debug, Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ClientError> {
        let builder = self.client.authed(Method::GET, &format!("/users/{}", user_id))?;
        let mut profile: UserProfile = self.client.send(builder).await?;
        sort_newest_first(&mut profile.posts);
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, ClientError> {
        let builder = self
            .client
            .authed(Method::PUT, &format!("/users/{}", user_id))?
            .json(request);
        let updated = self.client.send_optional(builder).await.inspect_err(|e| {
            tracing::error!(%user_id, error = %e, "profile update failed");
        })?;
        tracing::info!(%user_id, "profile updated");
        Ok(updated)
    }

    /// The signed-in user's id, read from the session token.
    pub fn current_user_id(&self, codec: &TokenCodec) -> Result<String, ClientError> {
        let record = self.client.session().require()?;
        codec.user_id(&record.token).inspect_err(|e| {
            if e.is_auth_failure() {
                tracing::warn!(error = %e, "session token rejected");
                if let Err(clear) = self.client.session().clear() {
                    tracing::warn!(error = %clear, "could not clear session");
                }
            }
        })
    }

    /// Profile of the signed-in user
    pub async fn current_profile(&self, codec: &TokenCodec) -> Result<UserProfile, ClientError> {
        let user_id = self.current_user_id(codec)?;
        self.get_profile(&user_id).await
    }
}
