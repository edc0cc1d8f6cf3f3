//! Session store.
//!
//! `SessionStore` is the only writer of authentication state. It persists the
//! `(token, user)` pair through a [`LocalStorage`], keeps the last published
//! [`Session`] for synchronous reads and fans every change out to its
//! observers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;

use super::model::Session;
use super::storage::{LocalStorage, TOKEN_KEY, USER_KEY};
use crate::error::{FelisError, Result};
use crate::user::{AuthUser, UserProfile};

/// Callback invoked with every published session snapshot.
pub type SessionObserver = Arc<dyn Fn(&Session) + Send + Sync>;

struct ObserverEntry {
    id: u64,
    cancel: CancellationToken,
    observer: SessionObserver,
}

/// Handle to one registered observer.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stops delivery to this observer only.
    pub fn unsubscribe(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owner of the client's authentication state.
///
/// Observers are invoked synchronously, in registration order, while the
/// store's writer lock is held. They may read snapshots (`current_user`,
/// `is_authenticated`, ...) but must not call `set_session`, `clear`,
/// `restore` or `subscribe` from inside the callback.
pub struct SessionStore {
    storage: Arc<dyn LocalStorage>,
    current: RwLock<Session>,
    observers: Mutex<Vec<ObserverEntry>>,
    /// Serializes writers so observers see publishes in mutation order.
    writer: Mutex<()>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    /// Creates a store with an empty session. Call [`restore`](Self::restore)
    /// to load a persisted one.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(Session::empty()),
            observers: Mutex::new(Vec::new()),
            writer: Mutex::new(()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a store and immediately restores the persisted session.
    pub fn restored(storage: Arc<dyn LocalStorage>) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Loads the persisted session and publishes it.
    ///
    /// Anything short of a non-empty token plus a parseable user (either half
    /// missing, corrupt JSON, unreadable storage) clears the persisted entries
    /// and publishes an empty session.
    pub fn restore(&self) -> Session {
        let _writer = lock(&self.writer);

        let session = match self.read_persisted() {
            Ok(Some(session)) => {
                tracing::info!("[SessionStore] Restored persisted session");
                session
            }
            Ok(None) => {
                self.discard_persisted();
                Session::empty()
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Discarding unreadable persisted session: {}", e);
                self.discard_persisted();
                Session::empty()
            }
        };

        self.publish(session.clone());
        session
    }

    /// Normalizes `user`, persists `(token, user)` and publishes the session.
    ///
    /// An empty token is rejected. If persisting fails nothing is published.
    pub fn set_session(
        &self,
        user: impl Into<UserProfile>,
        token: impl Into<String>,
    ) -> Result<Session> {
        let user = user.into();
        let token = token.into();
        if token.is_empty() {
            return Err(FelisError::validation("session token must not be empty"));
        }

        let user_json = serde_json::to_string(&user)?;

        let _writer = lock(&self.writer);
        self.storage
            .set_entries(&[(TOKEN_KEY, token.as_str()), (USER_KEY, user_json.as_str())])?;

        tracing::info!("[SessionStore] Session established for user {}", user.id);
        let session = Session::authenticated(token, user);
        self.publish(session.clone());
        Ok(session)
    }

    /// Removes the persisted session and publishes an empty one.
    ///
    /// The empty session is published even when removal fails; the storage
    /// error is returned afterwards.
    pub fn clear(&self) -> Result<()> {
        let _writer = lock(&self.writer);
        let removed = self.storage.remove_entries(&[TOKEN_KEY, USER_KEY]);
        if let Err(e) = &removed {
            tracing::error!("[SessionStore] Failed to remove persisted session: {}", e);
        }

        tracing::info!("[SessionStore] Session cleared");
        self.publish(Session::empty());
        removed
    }

    // ============================================================================
    // Snapshot reads
    // ============================================================================

    pub fn snapshot(&self) -> Session {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.snapshot().user().cloned()
    }

    pub fn current_token(&self) -> Option<String> {
        self.snapshot().token().map(str::to_string)
    }

    // ============================================================================
    // Change notifications
    // ============================================================================

    /// Registers an observer.
    ///
    /// The observer is called right away with the current session and then on
    /// every publish until `cancel` (or the returned subscription) is
    /// cancelled.
    pub fn subscribe(
        &self,
        cancel: &CancellationToken,
        observer: impl Fn(&Session) + Send + Sync + 'static,
    ) -> Subscription {
        let _writer = lock(&self.writer);

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = cancel.child_token();
        let observer: SessionObserver = Arc::new(observer);

        if !token.is_cancelled() {
            observer(&self.snapshot());
        }

        lock(&self.observers).push(ObserverEntry {
            id,
            cancel: token.clone(),
            observer,
        });

        Subscription { id, cancel: token }
    }

    /// Number of observers that have not been pruned yet.
    pub fn observer_count(&self) -> usize {
        lock(&self.observers)
            .iter()
            .filter(|entry| !entry.cancel.is_cancelled())
            .count()
    }

    // ============================================================================
    // Internals (callers hold the writer lock)
    // ============================================================================

    fn read_persisted(&self) -> Result<Option<Session>> {
        let token = self
            .storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty());
        let user = self.storage.get(USER_KEY)?;

        match (token, user) {
            (Some(token), Some(raw_user)) => {
                let user: AuthUser = serde_json::from_str(&raw_user)?;
                Ok(Some(Session::authenticated(token, user.into())))
            }
            _ => Ok(None),
        }
    }

    fn discard_persisted(&self) {
        if let Err(e) = self.storage.remove_entries(&[TOKEN_KEY, USER_KEY]) {
            tracing::error!("[SessionStore] Failed to clear persisted session: {}", e);
        }
    }

    fn publish(&self, session: Session) {
        {
            let mut current = self
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *current = session.clone();
        }

        let observers: Vec<(CancellationToken, SessionObserver)> = {
            let mut entries = lock(&self.observers);
            entries.retain(|entry| !entry.cancel.is_cancelled());
            entries
                .iter()
                .map(|entry| (entry.cancel.clone(), entry.observer.clone()))
                .collect()
        };

        // An earlier observer may tear down a later one mid-publish.
        for (cancel, observer) in observers {
            if cancel.is_cancelled() {
                continue;
            }
            observer(&session);
        }
    }
}
