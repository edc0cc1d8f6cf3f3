//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the published `Session` snapshot
//! - `storage`: the durable key/value port the store persists through
//! - `store`: `SessionStore`, the single writer of session state

mod model;
mod storage;
mod store;

pub use model::{AuthenticatedSession, Session};
pub use storage::{LocalStorage, TOKEN_KEY, USER_KEY};
pub use store::{SessionObserver, SessionStore, Subscription};
