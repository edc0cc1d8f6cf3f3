pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod search;
pub mod session;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::FelisError;
