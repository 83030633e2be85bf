//! # Session
//!
//! The session record is the one piece of client state that outlives a page
//! view: `{ token, expiry }` serialized as a single blob under the session
//! key. [`SessionContext`] is its only owner. The auth gate, the API client
//! and the expiry watcher all go through it instead of touching storage.
//!
//! A record with `now > expiry` is invalid. It is purged the moment anyone
//! reads it, and [`ExpiryWatcher`] purges it proactively at the deadline.
//!
//! Older clients stored `{ isAuthenticated, token }` or
//! `{ data: { token } }` without an expiry. Those are recognised and purged,
//! forcing a fresh login.

mod clock;
mod expiry;
mod storage;

pub use clock::{Clock, SystemClock, TokioClock};
pub use expiry::ExpiryWatcher;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::shared::config::ConfigError;

/// Persisted credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl SessionRecord {
    /// Fails when `created_at + ttl` is not a representable instant.
    pub fn new(token: impl Into<String>, created_at: DateTime<Utc>, ttl: Duration) -> Result<Self, ClientError> {
        let expiry = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| created_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                ConfigError::invalid("session_ttl", format!("{} seconds is out of range", ttl.as_secs()))
            })?;
        Ok(Self {
            token: token.into(),
            expiry,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }

    /// Time left before the record goes stale
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expiry - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Observable authentication state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Unauthenticated,
    Authenticated { expiry: DateTime<Utc> },
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Current(SessionRecord),
    LegacyFlag {
        #[serde(rename = "isAuthenticated")]
        _is_authenticated: IgnoredAny,
    },
    LegacyNested {
        #[serde(rename = "data")]
        _data: IgnoredAny,
    },
}

enum Stored {
    Empty,
    Valid(SessionRecord),
    Expired,
    Invalid(&'static str),
}

/// Single owner of the session record
#[derive(Debug)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    key: String,
    ttl: Duration,
    status: watch::Sender<AuthStatus>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>, ttl: Duration) -> Self {
        let (status, _) = watch::channel(AuthStatus::Unauthenticated);
        Self {
            storage,
            clock: Arc::new(SystemClock),
            key: key.into(),
            ttl,
            status,
        }
    }

    pub fn from_config(config: &Config, storage: Arc<dyn SessionStorage>) -> Self {
        Self::new(storage, config.session_key(), config.session_ttl())
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Persist `record`, replacing whatever was stored.
    pub fn save(&self, record: &SessionRecord) -> Result<(), ClientError> {
        let blob = serde_json::to_string(record).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.storage.set_item(&self.key, &blob)?;
        self.publish(AuthStatus::Authenticated {
            expiry: record.expiry,
        });
        Ok(())
    }

    /// Create and persist a record for a freshly issued token.
    pub fn establish(&self, token: impl Into<String>) -> Result<SessionRecord, ClientError> {
        let record = SessionRecord::new(token, self.now(), self.ttl)?;
        self.save(&record)?;
        tracing::info!(expiry = %record.expiry, "session established");
        Ok(record)
    }

    /// The stored record, if present and not expired. Expired or unreadable
    /// records are purged on the way.
    pub fn load(&self) -> Result<Option<SessionRecord>, ClientError> {
        match self.read()? {
            Stored::Empty => {
                self.publish(AuthStatus::Unauthenticated);
                Ok(None)
            }
            Stored::Valid(record) => {
                self.publish(AuthStatus::Authenticated {
                    expiry: record.expiry,
                });
                Ok(Some(record))
            }
            Stored::Expired => {
                self.purge("expired")?;
                Ok(None)
            }
            Stored::Invalid(reason) => {
                self.purge(reason)?;
                Ok(None)
            }
        }
    }

    /// Like [`load`](Self::load) but a missing session is an error.
    pub fn require(&self) -> Result<SessionRecord, ClientError> {
        self.load()?.ok_or(ClientError::MissingSession)
    }

    pub fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.load()?.map(|record| record.token))
    }

    /// Purge the record if its deadline has passed. Returns whether anything
    /// was purged.
    pub fn expire_if_due(&self) -> Result<bool, ClientError> {
        match self.read()? {
            Stored::Expired => {
                self.purge("expired")?;
                Ok(true)
            }
            Stored::Invalid(reason) => {
                self.purge(reason)?;
                Ok(true)
            }
            Stored::Valid(record) => {
                self.publish(AuthStatus::Authenticated {
                    expiry: record.expiry,
                });
                Ok(false)
            }
            Stored::Empty => {
                self.publish(AuthStatus::Unauthenticated);
                Ok(false)
            }
        }
    }

    /// Remove the record (logout, failed introspection, 401).
    pub fn clear(&self) -> Result<(), ClientError> {
        let result = self.storage.remove_item(&self.key);
        self.publish(AuthStatus::Unauthenticated);
        result
    }

    /// Flip to unauthenticated without touching storage. Used when storage
    /// itself is failing.
    pub fn mark_unauthenticated(&self) {
        self.publish(AuthStatus::Unauthenticated);
    }

    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    fn read(&self) -> Result<Stored, ClientError> {
        let Some(blob) = self.storage.get_item(&self.key)? else {
            return Ok(Stored::Empty);
        };
        Ok(match serde_json::from_str::<StoredBlob>(&blob) {
            Ok(StoredBlob::Current(record)) if record.is_expired_at(self.now()) => Stored::Expired,
            Ok(StoredBlob::Current(record)) if record.token.is_empty() => Stored::Invalid("empty token"),
            Ok(StoredBlob::Current(record)) => Stored::Valid(record),
            Ok(StoredBlob::LegacyFlag { .. }) | Ok(StoredBlob::LegacyNested { .. }) => {
                Stored::Invalid("legacy record without expiry")
            }
            Err(_) => Stored::Invalid("unreadable record"),
        })
    }

    fn purge(&self, reason: &str) -> Result<(), ClientError> {
        tracing::info!(reason, "clearing session record");
        self.clear()
    }

    fn publish(&self, status: AuthStatus) {
        self.status.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}
