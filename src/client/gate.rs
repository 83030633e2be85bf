//! Auth gate
//!
//! Runs on every navigation. Public routes pass without network access.
//! Everything else needs a valid local session and a positive answer from
//! the backend's introspection endpoint. Any failure is fail-closed: the
//! local session is cleared and the caller is told to replace the current
//! route with the login route.

use std::future::Future;
use std::sync::Arc;

use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::client::session::SessionContext;
use crate::shared::routes;

/// Asks the backend whether the held credential is still good.
pub trait Introspect: Send + Sync {
    fn introspect(&self) -> impl Future<Output = Result<bool, ClientError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Authorized,
    Unauthorized,
}

/// What to wrap the page in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// Public pages render on their own
    Bare,
    /// Private pages render inside the navigation shell
    Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Render { shell: Shell },
    Redirect { to: String, replace: bool },
}

#[derive(Debug)]
pub struct AuthGate<I> {
    config: Config,
    session: Arc<SessionContext>,
    introspector: I,
    state: GateState,
}

impl<I: Introspect> AuthGate<I> {
    pub fn new(config: Config, session: Arc<SessionContext>, introspector: I) -> Self {
        Self {
            config,
            session,
            introspector,
            state: GateState::Checking,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Decide whether `path` may render.
    pub async fn check(&mut self, path: &str) -> GateDecision {
        let path = routes::normalize(path);
        self.state = GateState::Checking;

        if self.config.is_public(&path) {
            self.state = GateState::Authorized;
            // Signed-in users have no business on the login/register pages.
            let home = routes::normalize(self.config.home_route());
            if path != home && matches!(self.session.load(), Ok(Some(_))) {
                tracing::debug!(%path, "already signed in, leaving public route");
                return GateDecision::Redirect {
                    to: home,
                    replace: true,
                };
            }
            tracing::debug!(%path, "public route");
            return GateDecision::Render { shell: Shell::Bare };
        }

        match self.session.load() {
            Ok(Some(_)) => {}
            Ok(None) => return self.refuse(&path, "no session"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read session");
                return self.refuse(&path, "unreadable session");
            }
        }

        match self.introspector.introspect().await {
            Ok(true) => {
                self.state = GateState::Authorized;
                GateDecision::Render {
                    shell: Shell::Navigation,
                }
            }
            Ok(false) => self.refuse(&path, "credential reported invalid"),
            Err(e) => {
                tracing::warn!(error = %e, "auth check failed");
                self.refuse(&path, "auth check failed")
            }
        }
    }

    fn refuse(&mut self, path: &str, reason: &str) -> GateDecision {
        tracing::info!(%path, reason, "redirecting to login");
        self.state = GateState::Unauthorized;
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "could not clear session");
        }
        GateDecision::Redirect {
            to: routes::normalize(self.config.login_route()),
            replace: true,
        }
    }
}
