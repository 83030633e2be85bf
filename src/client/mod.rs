//! Feed Client Module
//!
//! Async client for the social-feed REST backend: session handling, the
//! route auth gate, and the post/like/profile endpoints.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs      - Module exports
//! ├── main.rs     - Terminal client (binary)
//! ├── app.rs      - FeedApp, wires everything to one session
//! ├── config.rs   - Configuration wrapper
//! ├── error.rs    - ClientError
//! ├── session/    - Session record, storage, clock, expiry watcher
//! ├── token.rs    - JWT verification, userId claim
//! ├── http.rs     - Shared request/response handling
//! ├── gate.rs     - Route auth gate
//! ├── router.rs   - Navigation history
//! ├── auth.rs     - Login, register, logout, introspection
//! ├── users.rs    - Profiles
//! ├── posts.rs    - Posts and likes endpoints, drafts
//! ├── likes.rs    - Optimistic like state
//! ├── feed.rs     - Rendered post list
//! └── views.rs    - Plain-text renderers
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod gate;
pub mod http;
pub mod likes;
pub mod posts;
pub mod router;
pub mod session;
pub mod token;
pub mod users;
pub mod views;

pub use app::FeedApp;
pub use auth::AuthApi;
pub use config::Config;
pub use error::ClientError;
pub use feed::{FeedState, PostCard};
pub use gate::{AuthGate, GateDecision, GateState, Introspect, Shell};
pub use http::ApiClient;
pub use likes::{toggle_like, LikeAction, LikeState, PendingLike};
pub use posts::{ImagePayload, PostApi, PostDraft};
pub use router::Navigator;
pub use session::{
    AuthStatus, Clock, ExpiryWatcher, FileStorage, MemoryStorage, SessionContext, SessionRecord,
    SessionStorage, SystemClock, TokioClock,
};
pub use token::TokenCodec;
pub use users::UserApi;
