//! # Optimistic likes
//!
//! A like button shows its new state the moment it is pressed. The change is
//! recorded as a [`PendingLike`] and the control stays disabled until the
//! request resolves: success commits (and adopts whatever the server states
//! about the result), failure reverts to the values from before the press.

use uuid::Uuid;

use crate::client::error::ClientError;
use crate::client::posts::PostApi;
use crate::shared::feed::{LikeAck, LikeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

/// An applied but unconfirmed press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLike {
    pub id: Uuid,
    pub action: LikeAction,
    previous_liked: bool,
    previous_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeState {
    liked: bool,
    count: u64,
    pending: Option<PendingLike>,
}

impl LikeState {
    pub fn new(liked: bool, count: u64) -> Self {
        Self {
            liked,
            count,
            pending: None,
        }
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn pending(&self) -> Option<&PendingLike> {
        self.pending.as_ref()
    }

    /// Whether the control accepts a press right now
    pub fn is_enabled(&self) -> bool {
        self.pending.is_none()
    }

    /// Adopt the server's view. Ignored while a press is in flight.
    pub fn seed(&mut self, status: LikeStatus) {
        if self.pending.is_some() {
            return;
        }
        self.liked = status.liked;
        if let Some(count) = status.like_count {
            self.count = count;
        }
    }

    /// Apply a press. `None` while another press is pending.
    pub fn begin(&mut self) -> Option<PendingLike> {
        if self.pending.is_some() {
            return None;
        }
        let action = if self.liked {
            LikeAction::Unlike
        } else {
            LikeAction::Like
        };
        let pending = PendingLike {
            id: Uuid::new_v4(),
            action,
            previous_liked: self.liked,
            previous_count: self.count,
        };

        self.liked = !self.liked;
        self.count = match action {
            LikeAction::Like => self.count.saturating_add(1),
            LikeAction::Unlike => self.count.saturating_sub(1),
        };
        self.pending = Some(pending);
        Some(pending)
    }

    /// Confirm a press. Returns false for an id that is not pending.
    pub fn commit(&mut self, id: Uuid, ack: LikeAck) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.pending = None;
        if let Some(liked) = ack.liked {
            self.liked = liked;
        }
        if let Some(count) = ack.like_count {
            self.count = count;
        }
        true
    }

    /// Undo a press. Returns false for an id that is not pending.
    pub fn revert(&mut self, id: Uuid) -> bool {
        let Some(pending) = self.pending.filter(|p| p.id == id) else {
            return false;
        };
        self.liked = pending.previous_liked;
        self.count = pending.previous_count;
        self.pending = None;
        true
    }

    fn is_pending(&self, id: Uuid) -> bool {
        self.pending.is_some_and(|p| p.id == id)
    }
}

/// Press the like control of `post_id` and settle it against the backend.
/// Returns whether a request was made.
pub async fn toggle_like(
    api: &PostApi,
    post_id: &str,
    state: &mut LikeState,
    user_id: &str,
) -> Result<bool, ClientError> {
    let Some(pending) = state.begin() else {
        tracing::debug!(%post_id, "like already pending");
        return Ok(false);
    };

    let result = match pending.action {
        LikeAction::Like => api.like(post_id, user_id).await,
        LikeAction::Unlike => api.unlike(post_id, user_id).await,
    };

    match result {
        Ok(ack) => {
            state.commit(pending.id, ack);
            Ok(true)
        }
        Err(e) => {
            state.revert(pending.id);
            Err(e)
        }
    }
}
