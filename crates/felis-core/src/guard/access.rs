//! Access guard for protected routes.

use std::sync::Arc;

use super::route::Route;
use crate::session::SessionStore;

/// Receives redirect instructions issued by the guard.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Gate consulted before entering a protected view.
///
/// The guard only reads the session; it never mutates it.
#[derive(Clone)]
pub struct AccessGuard {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AccessGuard {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Returns true when a session exists; otherwise redirects to the login
    /// route and returns false.
    pub fn can_enter(&self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }

        tracing::debug!("[AccessGuard] No session, redirecting to {}", Route::Login);
        self.navigator.navigate(Route::Login);
        false
    }

    /// Checks `route`: guarded routes go through [`can_enter`](Self::can_enter),
    /// public routes always pass.
    pub fn enter(&self, route: Route) -> bool {
        !route.is_guarded() || self.can_enter()
    }

    /// Used by the login and register views: an authenticated user is sent
    /// home. Returns true when a redirect was issued.
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.session.is_authenticated() {
            self.navigator.navigate(Route::Home);
            true
        } else {
            false
        }
    }
}
