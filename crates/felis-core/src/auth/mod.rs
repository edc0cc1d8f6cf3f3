//! Auth backend contract.
//!
//! - `model`: request bodies, the response envelope and error bodies
//! - `service`: the `AuthApi` port implemented by the HTTP adapter

mod model;
mod service;

pub use model::{ApiEnvelope, AuthPayload, ErrorBody, LoginRequest, RegisterRequest, server_message};
pub use service::{AuthApi, AuthResponse};
