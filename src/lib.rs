//! Socialfeed - Client Library
//!
//! Async client for a social-feed REST backend: users log in, browse a feed
//! of posts, publish and delete posts, like and unlike them, and view
//! profiles.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that mirror the backend contract
//!   - Response envelope, posts, likes, users
//!   - Routes, form validation, configuration
//!   - Error types
//!
//! - **`client`** - Everything that talks to the backend
//!   - Session record with scheduled expiry
//!   - Route auth gate with fail-closed introspection
//!   - Post, like and profile endpoints, optimistic like state
//!   - Plain-text views for the terminal client
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use socialfeed::client::{Config, FeedApp, FeedState, MemoryStorage};
//!
//! # async fn example() -> Result<(), socialfeed::client::ClientError> {
//! let config = Config::from_env()?;
//! let mut app = FeedApp::new(config, Arc::new(MemoryStorage::new()))?;
//! app.start();
//!
//! app.login("janedoe1", "password123").await?;
//! let mut feed = FeedState::new();
//! feed.load_all(app.posts()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod shared;
