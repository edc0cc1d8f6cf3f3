//! HttpAuthApi - REST adapter for the auth backend.
//!
//! Both endpoints answer with an `{ data, message?, success }` envelope.
//! Non-2xx statuses carry an error body whose message is preserved.

use std::time::Duration;

use async_trait::async_trait;
use felis_core::auth::{
    ApiEnvelope, AuthApi, AuthPayload, AuthResponse, LoginRequest, RegisterRequest,
};
use felis_core::config::ApiConfig;
use felis_core::error::{FelisError, Result};
use reqwest::Client;
use serde::Serialize;

use crate::http::{build_client, endpoint, parse_json, success_body, transport_error};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// Auth backend reached over HTTP.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.auth_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<AuthResponse> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!("[HttpAuthApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(err, "HttpAuthApi"))?;

        let body = success_body(response, "HttpAuthApi").await?;
        let envelope: ApiEnvelope<AuthPayload> = parse_json(&body)?;
        into_auth_response(envelope)
    }
}

fn into_auth_response(envelope: ApiEnvelope<AuthPayload>) -> Result<AuthResponse> {
    if !envelope.success {
        return Err(FelisError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "Request was rejected".to_string()),
        ));
    }

    let data = envelope
        .data
        .ok_or_else(|| FelisError::internal("Auth response has no data"))?;

    Ok(AuthResponse {
        token: data.token,
        user: data.user,
        message: envelope.message,
    })
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.post(LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post(REGISTER_PATH, request).await
    }
}
