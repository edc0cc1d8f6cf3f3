//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: canonical `UserProfile` and the `AuthUser` wire shape it is
//!   normalized from
//!
//! # Usage
//!
//! ```ignore
//! use felis_core::user::{AuthUser, UserProfile};
//! ```

mod model;

// Re-export public API
pub use model::{AuthUser, UserProfile};
