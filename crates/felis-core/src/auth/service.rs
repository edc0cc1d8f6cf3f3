use async_trait::async_trait;

use super::model::{LoginRequest, RegisterRequest};
use crate::error::Result;
use crate::user::AuthUser;

/// Successful answer of the login or registration endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
    pub message: Option<String>,
}

/// Remote auth endpoints.
///
/// Implementations issue exactly one request per call and never touch the
/// session; failures carry the server message when there is one.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
}
