//! HTTP adapters for the felis ports.
//!
//! - `auth_api`: `HttpAuthApi`, the login/registration endpoints
//! - `catalog_client`: `CatalogClient`, the breed catalog
//! - `http`: shared client construction and response mapping

pub mod auth_api;
pub mod catalog_client;
mod http;

pub use auth_api::HttpAuthApi;
pub use catalog_client::CatalogClient;
