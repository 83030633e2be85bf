//! Feed Types
//!
//! Wire types for the social-feed REST backend: the response envelope,
//! posts, likes, users and auth payloads.

pub mod de;
pub mod envelope;
pub mod post;
pub mod user;

pub use envelope::{ApiResponse, ErrorBody};
pub use post::{
    sort_newest_first, CreatePostRequest, LikeAck, LikeStatus, LikeStatusBody, Post,
    UpdatePostRequest, MAX_POST_LENGTH,
};
pub use user::{
    IntrospectResult, LoginRequest, RegisterRequest, TokenResult, UpdateProfileRequest,
    UserProfile,
};
