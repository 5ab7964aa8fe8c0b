//! Explicit per-user session context.
//!
//! The session is constructed once at startup and handed to everything that
//! needs to know who is signed in: the record store scopes rows by it, the
//! app bar gates navigation on it. It is set on the sign-in event and
//! cleared on sign-out; there is no ambient global user.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// A signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable auth-provider id; rows are owned by this value
    pub id: String,
    pub email: String,
}

/// Shared session state: the current signed-in user, or none.
///
/// Interior mutability so a single instance can be shared between the store,
/// the workflow, and the presentation layer.
#[derive(Debug, Default)]
pub struct UserSession {
    user: RwLock<Option<User>>,
}

impl UserSession {
    /// Creates an anonymous (signed-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `user`. Test convenience.
    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Returns the current signed-in user, or `None`.
    ///
    /// A poisoned lock is treated as signed-out rather than a panic; the
    /// worst case is a skipped best-effort write.
    pub fn current_user(&self) -> Option<User> {
        self.user.read().ok().and_then(|guard| guard.clone())
    }

    /// Records a successful sign-in.
    pub fn set_user(&self, user: User) {
        if let Ok(mut guard) = self.user.write() {
            *guard = Some(user);
        }
    }

    /// Clears the session on sign-out.
    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.user.write() {
            *guard = None;
        }
    }
}
