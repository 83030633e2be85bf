//! Post Data Structures
//!
//! Posts are owned by the backend; the client keeps a read-mostly copy per
//! page view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

/// Maximum post length accepted before a request is sent
pub const MAX_POST_LENGTH: usize = 5000;

/// A post as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    /// Author of the post
    #[serde(rename = "userId", alias = "authorId", deserialize_with = "de::id")]
    pub author_id: String,
    /// Author display name, when the backend joins it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "de::count")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "de::count")]
    pub comment_count: u64,
    #[serde(deserialize_with = "de::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub user_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of `PUT /posts/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Detailed like status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    #[serde(default, alias = "isLiked")]
    pub liked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
}

/// `GET /posts/:id/like/status` answers either a bare flag or an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LikeStatusBody {
    Flag(bool),
    Detailed(LikeStatus),
}

impl From<LikeStatusBody> for LikeStatus {
    fn from(body: LikeStatusBody) -> Self {
        match body {
            LikeStatusBody::Flag(liked) => LikeStatus {
                liked,
                like_count: None,
            },
            LikeStatusBody::Detailed(status) => status,
        }
    }
}

/// Server acknowledgement of a like or unlike. Whatever the backend returns
/// is kept only as far as it states the resulting like state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeAck {
    pub liked: Option<bool>,
    pub like_count: Option<u64>,
}

impl LikeAck {
    /// Pull `liked` / `likeCount` out of an arbitrary result payload.
    pub fn from_result(result: Option<&serde_json::Value>) -> Self {
        let Some(value) = result else {
            return Self::default();
        };
        if let Some(liked) = value.as_bool() {
            return Self {
                liked: Some(liked),
                like_count: None,
            };
        }
        Self {
            liked: value
                .get("liked")
                .or_else(|| value.get("isLiked"))
                .and_then(|v| v.as_bool()),
            like_count: value.get("likeCount").and_then(|v| v.as_u64()),
        }
    }
}

/// Order posts newest first. Ties keep their backend order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
