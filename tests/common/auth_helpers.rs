//! Authentication test helpers
//!
//! Token signing with the shared test key, and a clock the tests move by
//! hand.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use socialfeed::client::Clock;

/// Signing key shared by the fake backend and the client config
pub const SIGNING_KEY: &str = "integration-test-signing-key-0123456789abcdefghijklmnopqrstuvwxyz";

/// Test user credentials
pub struct TestUser {
    pub id: &'static str,
    pub username: &'static str,
    pub password: &'static str,
}

pub const JANE: TestUser = TestUser {
    id: "42",
    username: "janedoe1",
    password: "password123",
};

/// Generate an HS512 token carrying `userId`, valid for an hour
pub fn sign_token(user_id: &str) -> String {
    sign_token_with(user_id, SIGNING_KEY)
}

pub fn sign_token_with(user_id: &str, key: &str) -> String {
    let claims = serde_json::json!({
        "userId": user_id,
        "sub": "test",
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Wall clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc::now()),
        }
    }

    pub fn advance(&self, by: std::time::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
