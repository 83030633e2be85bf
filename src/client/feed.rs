//! Feed state
//!
//! The locally rendered list of posts for one page view. Local changes only
//! follow confirmed backend changes: a created post is prepended once the
//! backend returns it, a deleted post disappears once the backend accepts
//! the delete.

use crate::client::error::ClientError;
use crate::client::likes::{self, LikeState};
use crate::client::posts::{PostApi, PostDraft};
use crate::shared::feed::Post;

/// One post plus its like control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub post: Post,
    pub likes: LikeState,
    mounted: bool,
}

impl PostCard {
    pub fn new(post: Post) -> Self {
        let likes = LikeState::new(false, post.like_count);
        Self {
            post,
            likes,
            mounted: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fetch whether `user_id` likes this post. Runs once per card.
    pub async fn mount(&mut self, api: &PostApi, user_id: &str) -> Result<(), ClientError> {
        if self.mounted {
            return Ok(());
        }
        let status = api.like_status(&self.post.id, user_id).await?;
        self.likes.seed(status);
        self.mounted = true;
        Ok(())
    }

    pub async fn toggle_like(&mut self, api: &PostApi, user_id: &str) -> Result<bool, ClientError> {
        likes::toggle_like(api, &self.post.id, &mut self.likes, user_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    All,
    User(String),
}

#[derive(Debug, Clone)]
pub struct FeedState {
    scope: FeedScope,
    cards: Vec<PostCard>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            scope: FeedScope::All,
            cards: Vec::new(),
        }
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.cards.iter().map(|card| &card.post)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_mut(&mut self, post_id: &str) -> Option<&mut PostCard> {
        self.cards.iter_mut().find(|card| card.post.id == post_id)
    }

    /// Replace the list with every post.
    pub async fn load_all(&mut self, api: &PostApi) -> Result<usize, ClientError> {
        let posts = api.list_all().await?;
        self.scope = FeedScope::All;
        Ok(self.replace(posts))
    }

    /// Replace the list with the posts of one user.
    pub async fn load_for_user(&mut self, api: &PostApi, user_id: &str) -> Result<usize, ClientError> {
        let posts = api.list_by_user(user_id).await?;
        self.scope = FeedScope::User(user_id.to_string());
        Ok(self.replace(posts))
    }

    /// Fetch like status for every card not yet mounted. Failures leave the
    /// card unseeded and are logged.
    pub async fn mount_all(&mut self, api: &PostApi, user_id: &str) -> usize {
        let mut mounted = 0;
        for card in self.cards.iter_mut().filter(|card| !card.is_mounted()) {
            match card.mount(api, user_id).await {
                Ok(()) => mounted += 1,
                Err(e) => tracing::warn!(post_id = %card.post.id, error = %e, "like status unavailable"),
            }
        }
        mounted
    }

    /// Publish a draft and put the created post at the top.
    pub async fn create(&mut self, api: &PostApi, draft: PostDraft, user_id: &str) -> Result<&PostCard, ClientError> {
        let post = api.create(draft, user_id).await?;
        self.cards.insert(0, PostCard::new(post));
        Ok(&self.cards[0])
    }

    /// Delete a post. The local list only changes if the backend accepted
    /// the delete.
    pub async fn delete(&mut self, api: &PostApi, post_id: &str) -> Result<(), ClientError> {
        api.delete(post_id).await?;
        self.cards.retain(|card| card.post.id != post_id);
        Ok(())
    }

    /// Posts whose content, author id or author username contains `query`,
    /// ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = query.trim().to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);
        self.posts()
            .filter(|post| {
                hit(&post.content) || hit(&post.author_id) || post.username.as_deref().is_some_and(hit)
            })
            .collect()
    }

    fn replace(&mut self, posts: Vec<Post>) -> usize {
        self.cards = posts.into_iter().map(PostCard::new).collect();
        self.cards.len()
    }
}
