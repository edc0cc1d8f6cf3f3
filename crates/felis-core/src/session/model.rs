//! Session snapshot model.

use crate::user::UserProfile;

/// Token and user of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub token: String,
    pub user: UserProfile,
}

/// Snapshot of the authentication state.
///
/// Either both token and user are present or neither is; a half-populated
/// session cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    inner: Option<AuthenticatedSession>,
}

impl Session {
    /// The signed-out session.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            inner: Some(AuthenticatedSession {
                token: token.into(),
                user,
            }),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.inner.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.inner.as_ref().map(|s| &s.user)
    }

    /// True iff a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|token| !token.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }
}
