pub mod auth;
pub mod breeds;
pub mod context;
