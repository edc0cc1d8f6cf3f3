//! Profile view model.

use std::sync::{Arc, Mutex, PoisonError};

use felis_core::error::Result;
use felis_core::session::{SessionStore, Subscription};
use felis_core::user::UserProfile;
use tokio_util::sync::CancellationToken;

/// Follows the session and exposes the signed-in user.
///
/// The subscription lives until [`close`](Self::close) or drop.
pub struct ProfileView {
    session: Arc<SessionStore>,
    user: Arc<Mutex<Option<UserProfile>>>,
    cancel: CancellationToken,
    subscription: Subscription,
}

impl ProfileView {
    pub fn new(session: Arc<SessionStore>, parent: &CancellationToken) -> Self {
        let cancel = parent.child_token();
        let user = Arc::new(Mutex::new(None));

        let latest = user.clone();
        let subscription = session.subscribe(&cancel, move |snapshot| {
            *latest.lock().unwrap_or_else(PoisonError::into_inner) = snapshot.user().cloned();
        });

        Self {
            session,
            user,
            cancel,
            subscription,
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn logout(&self) -> Result<()> {
        tracing::info!("[ProfileView] Logging out");
        self.session.clear()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.subscription.is_closed()
    }
}

impl Drop for ProfileView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use felis_core::user::AuthUser;
    use felis_infrastructure::MemoryStorage;

    fn auth_user(id: &str) -> AuthUser {
        AuthUser {
            id: id.into(),
            email: format!("user{id}@example.com"),
            user_name: Some(format!("user{id}")),
            first_name: Some("Test".into()),
            last_name: Some("User".into()),
            ..Default::default()
        }
    }

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())))
    }

    #[test]
    fn test_view_sees_current_and_later_users() {
        let session = store();
        session.set_session(auth_user("1"), "t1").unwrap();

        let view = ProfileView::new(session.clone(), &CancellationToken::new());
        assert_eq!(view.current_user().unwrap().id, "1");

        session.set_session(auth_user("2"), "t2").unwrap();
        assert_eq!(view.current_user().unwrap().user_name, "user2");
    }

    #[test]
    fn test_logout_empties_view() {
        let session = store();
        session.set_session(auth_user("1"), "t1").unwrap();
        let view = ProfileView::new(session.clone(), &CancellationToken::new());

        view.logout().unwrap();

        assert!(view.current_user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_closed_view_stops_following() {
        let session = store();
        let view = ProfileView::new(session.clone(), &CancellationToken::new());
        view.close();

        session.set_session(auth_user("1"), "t1").unwrap();

        assert!(view.is_closed());
        assert!(view.current_user().is_none());
        assert_eq!(session.observer_count(), 0);
    }

    #[test]
    fn test_parent_cancellation_closes_view() {
        let session = store();
        let parent = CancellationToken::new();
        let view = ProfileView::new(session.clone(), &parent);

        parent.cancel();

        assert!(view.is_closed());
    }
}
