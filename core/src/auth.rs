//! In-memory authentication state.
//!
//! # Design
//! The authenticated-iff-both-present invariant is enforced by construction:
//! the only mutations either set user and token together (`apply`) or clear
//! both (`reset`), so observers never see a half-populated state.

use crate::types::{User, UserResponse};

/// The `{user, token}` pair populated by login or session restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    token: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// True when neither user nor token is present. The reconciliation
    /// predicate checks full emptiness, not merely `!is_authenticated()`.
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.token.is_none()
    }

    /// Replace the state wholesale from a login or session payload.
    pub(crate) fn apply(&mut self, payload: &UserResponse) {
        self.user = Some(payload.user());
        self.token = Some(payload.token.clone());
    }

    pub(crate) fn reset(&mut self) {
        self.user = None;
        self.token = None;
    }
}

/// Outcome of a session reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Auth state was repopulated from the session record.
    Restored,
    /// Auth state was already populated; nothing to do.
    AlreadyAuthenticated,
    /// No authenticated session is recorded.
    NoSession,
    /// The record claimed authentication but the blob was unusable. The
    /// record has been cleared and auth state left unauthenticated.
    Malformed,
}
