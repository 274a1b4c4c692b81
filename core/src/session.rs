//! Persisted session record over host-owned key/value storage.
//!
//! # Design
//! The session record is the only state that survives a host restart. Where
//! it lives (browser storage, a file, a test map) is the host's choice,
//! expressed through the `SessionStore` trait; the core only reads and
//! writes two string keys and never performs I/O itself.
//!
//! A record that claims authentication but carries a missing or unparseable
//! blob is reported as `Malformed`, never silently accepted: restore must
//! fail closed to unauthenticated.

use std::collections::HashMap;

use tracing::warn;

use crate::error::ApiError;
use crate::types::UserResponse;

/// Storage key flagging an authenticated session ("true" when set).
pub const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";

/// Storage key holding the serialized `UserResponse` blob.
pub const USER_KEY: &str = "user";

/// Host-owned string key/value storage backing the session record.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory `SessionStore` for tests and hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Result of reading the session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedSession {
    /// No authenticated session is recorded.
    Missing,
    /// The record claims an authenticated session but the blob is absent or
    /// unparseable. Callers must treat this as unauthenticated.
    Malformed,
    /// An authenticated session with a valid blob.
    Valid(UserResponse),
}

/// Mirror a successful login payload into the session record.
///
/// Both keys are written together so a reader never observes the flag
/// without the blob.
pub fn persist(store: &mut impl SessionStore, payload: &UserResponse) -> Result<(), ApiError> {
    let blob =
        serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    store.set(USER_KEY, &blob);
    store.set(IS_AUTHENTICATED_KEY, "true");
    Ok(())
}

/// Remove the session record entirely.
pub fn clear(store: &mut impl SessionStore) {
    store.remove(IS_AUTHENTICATED_KEY);
    store.remove(USER_KEY);
}

/// Read the session record.
pub fn load(store: &impl SessionStore) -> LoadedSession {
    if store.get(IS_AUTHENTICATED_KEY).as_deref() != Some("true") {
        return LoadedSession::Missing;
    }
    let Some(blob) = store.get(USER_KEY) else {
        warn!("session record claims authentication but has no user blob");
        return LoadedSession::Malformed;
    };
    match serde_json::from_str(&blob) {
        Ok(payload) => LoadedSession::Valid(payload),
        Err(err) => {
            warn!("session record blob is unparseable: {err}");
            LoadedSession::Malformed
        }
    }
}
