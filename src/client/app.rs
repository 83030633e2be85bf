use std::sync::Arc;

use crate::client::auth::AuthApi;
use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::client::gate::{AuthGate, GateDecision};
use crate::client::http::ApiClient;
use crate::client::posts::PostApi;
use crate::client::router::Navigator;
use crate::client::session::{ExpiryWatcher, SessionContext, SessionRecord, SessionStorage};
use crate::client::token::TokenCodec;
use crate::client::users::UserApi;

/// Everything a front end needs, wired to one session.
#[derive(Debug)]
pub struct FeedApp {
    config: Config,
    session: Arc<SessionContext>,
    auth: AuthApi,
    users: UserApi,
    posts: PostApi,
    gate: AuthGate<AuthApi>,
    navigator: Navigator,
    codec: TokenCodec,
    watcher: Option<ExpiryWatcher>,
}

impl FeedApp {
    pub fn new(config: Config, storage: Arc<dyn SessionStorage>) -> Result<Self, ClientError> {
        let session = Arc::new(SessionContext::from_config(&config, storage));
        Self::with_session(config, session)
    }

    pub fn with_session(config: Config, session: Arc<SessionContext>) -> Result<Self, ClientError> {
        let client = ApiClient::new(config.clone(), session.clone())?;
        let auth = AuthApi::new(client.clone());
        Ok(Self {
            gate: AuthGate::new(config.clone(), session.clone(), auth.clone()),
            navigator: Navigator::new(config.home_route()),
            codec: TokenCodec::from_config(&config),
            users: UserApi::new(client.clone()),
            posts: PostApi::new(client),
            auth,
            session,
            config,
            watcher: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    pub fn posts(&self) -> &PostApi {
        &self.posts
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Start the expiry watcher. Needs a tokio runtime.
    pub fn start(&mut self) {
        if !self.watcher.as_ref().is_some_and(ExpiryWatcher::is_running) {
            self.watcher = Some(ExpiryWatcher::spawn(self.session.clone()));
        }
    }

    pub async fn shutdown(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.stop().await;
        }
    }

    /// Go to `path` through the auth gate.
    pub async fn navigate(&mut self, path: &str) -> GateDecision {
        self.navigator.push(path);
        let decision = self.gate.check(path).await;
        self.navigator.follow(&decision);
        decision
    }

    /// Log in, then head to the home route.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<SessionRecord, ClientError> {
        let record = self.auth.login(username, password).await?;
        let home = self.config.home_route().to_string();
        self.navigate(&home).await;
        Ok(record)
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let result = self.auth.logout().await;
        self.navigator.replace(self.config.login_route());
        result
    }

    /// User id of the signed-in user
    pub fn current_user_id(&self) -> Result<String, ClientError> {
        self.users.current_user_id(&self.codec)
    }

    /// Send the user to the login route when `error` ended the session.
    pub fn handle_error(&mut self, error: &ClientError) {
        if error.is_auth_failure() {
            tracing::info!(error = %error, "session ended");
            self.navigator.replace(self.config.login_route());
        }
    }
}
