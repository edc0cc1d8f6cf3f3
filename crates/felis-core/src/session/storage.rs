//! Durable local storage port.

use crate::error::Result;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Durable string key/value storage, the client's "local storage".
///
/// Multi-entry writes and removals must be applied as one unit: after a
/// successful call either all entries changed or, on error, none did.
pub trait LocalStorage: Send + Sync {
    /// Reads one entry.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes all entries together.
    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Removes all keys together. Missing keys are not an error.
    fn remove_entries(&self, keys: &[&str]) -> Result<()>;
}
