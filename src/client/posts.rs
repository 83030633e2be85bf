//! Post endpoints
//!
//! Lists always come back newest first, whatever order the backend used.

use std::path::Path;

use base64::prelude::*;
use reqwest::Method;

use crate::client::error::ClientError;
use crate::client::http::ApiClient;
use crate::shared::error::SharedError;
use crate::shared::feed::{
    sort_newest_first, CreatePostRequest, LikeAck, LikeStatus, LikeStatusBody, Post, UpdatePostRequest,
};
use crate::shared::validation;

/// Raw image bytes attached to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image file, picking the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => {
                return Err(SharedError::validation("image", format!("unsupported image type '{}'", ext)).into());
            }
        };
        Ok(Self::new(mime, std::fs::read(path)?))
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64_STANDARD.encode(&self.bytes))
    }
}

/// A post being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub image: Option<ImagePayload>,
}

impl PostDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        validation::post(&self.content, self.image.is_some())
    }

    pub fn into_request(self, user_id: &str) -> Result<CreatePostRequest, SharedError> {
        self.validate()?;
        Ok(CreatePostRequest {
            user_id: user_id.to_string(),
            content: self.content.trim().to_string(),
            image_url: self.image.as_ref().map(ImagePayload::data_url),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PostApi {
    client: ApiClient,
}

impl PostApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, draft: PostDraft, user_id: &str) -> Result<Post, ClientError> {
        let request = draft.into_request(user_id)?;
        let builder = self.client.authed(Method::POST, "/posts")?.json(&request);
        let post: Post = self.client.send(builder).await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to create post");
        })?;
        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }

    pub async fn update(&self, post_id: &str, request: &UpdatePostRequest) -> Result<Post, ClientError> {
        validation::post(&request.content, request.image_url.is_some())?;
        let builder = self
            .client
            .authed(Method::PUT, &format!("/posts/{}", post_id))?
            .json(request);
        self.client.send(builder).await.inspect_err(|e| {
            tracing::error!(%post_id, error = %e, "failed to update post");
        })
    }

    pub async fn delete(&self, post_id: &str) -> Result<(), ClientError> {
        let builder = self.client.authed(Method::DELETE, &format!("/posts/{}", post_id))?;
        self.client
            .send_optional::<serde_json::Value>(builder)
            .await
            .inspect_err(|e| tracing::error!(%post_id, error = %e, "failed to delete post"))?;
        tracing::info!(%post_id, "post deleted");
        Ok(())
    }

    pub async fn get(&self, post_id: &str) -> Result<Post, ClientError> {
        let builder = self.client.authed(Method::GET, &format!("/posts/{}", post_id))?;
        self.client.send(builder).await
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, ClientError> {
        let builder = self.client.authed(Method::GET, "/posts")?;
        self.list(builder).await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Post>, ClientError> {
        let builder = self.client.authed(Method::GET, &format!("/posts/user/{}", user_id))?;
        self.list(builder).await
    }

    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<LikeAck, ClientError> {
        self.like_request(Method::PUT, post_id, user_id).await
    }

    pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<LikeAck, ClientError> {
        self.like_request(Method::DELETE, post_id, user_id).await
    }

    pub async fn like_status(&self, post_id: &str, user_id: &str) -> Result<LikeStatus, ClientError> {
        let builder = self
            .client
            .authed(Method::GET, &format!("/posts/{}/like/status", post_id))?
            .query(&[("userId", user_id)]);
        let body: LikeStatusBody = self.client.send(builder).await?;
        Ok(body.into())
    }

    async fn list(&self, builder: reqwest::RequestBuilder) -> Result<Vec<Post>, ClientError> {
        let mut posts: Vec<Post> = self.client.send_optional(builder).await?.unwrap_or_default();
        sort_newest_first(&mut posts);
        tracing::debug!(count = posts.len(), "posts loaded");
        Ok(posts)
    }

    async fn like_request(&self, method: Method, post_id: &str, user_id: &str) -> Result<LikeAck, ClientError> {
        let action = if method == Method::PUT { "like" } else { "unlike" };
        let builder = self
            .client
            .authed(method, &format!("/posts/{}/like", post_id))?
            .query(&[("userId", user_id)]);
        let result = self
            .client
            .send_optional::<serde_json::Value>(builder)
            .await
            .inspect_err(|e| tracing::error!(%post_id, action, error = %e, "like request failed"))?;
        Ok(LikeAck::from_result(result.as_ref()))
    }
}
