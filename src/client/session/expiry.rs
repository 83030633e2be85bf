//! Scheduled session expiry
//!
//! One task, one timer: it sleeps until the stored deadline, purges the
//! record and flips the auth status, then waits for the next session. A
//! re-login re-arms it with the new deadline. The task is tied to the
//! [`ExpiryWatcher`] handle and dies with it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::{AuthStatus, SessionContext};

/// Records are valid up to and including their expiry instant; wake just
/// after it.
const EXPIRY_GRACE: Duration = Duration::from_millis(1);

#[derive(Debug)]
pub struct ExpiryWatcher {
    handle: Option<JoinHandle<()>>,
}

impl ExpiryWatcher {
    /// Start watching. Must be called from inside a tokio runtime.
    pub fn spawn(session: Arc<SessionContext>) -> Self {
        Self {
            handle: Some(tokio::spawn(watch_expiry(session))),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the timer and wait for the task to wind down.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ExpiryWatcher {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn watch_expiry(session: Arc<SessionContext>) {
    let mut status = session.subscribe();
    // Pick up a record persisted before the watcher started.
    if let Err(e) = session.load() {
        tracing::warn!(error = %e, "could not read session record");
    }

    loop {
        let current = status.borrow_and_update().clone();
        match current {
            AuthStatus::Authenticated { expiry } => {
                let wait = (expiry - session.now()).to_std().unwrap_or(Duration::ZERO) + EXPIRY_GRACE;
                tokio::select! {
                    _ = tokio::time::sleep(wait) => {
                        match session.expire_if_due() {
                            Ok(true) => tracing::info!("session expired"),
                            Ok(false) => {}
                            Err(e) => {
                                tracing::warn!(error = %e, "could not purge expired session");
                                session.mark_unauthenticated();
                            }
                        }
                    }
                    changed = status.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            AuthStatus::Unauthenticated => {
                if status.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}
