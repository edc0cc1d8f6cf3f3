//! Shared reqwest plumbing: client construction and mapping of transport
//! failures and HTTP statuses onto `FelisError`.

use std::time::Duration;

use felis_core::auth::server_message;
use felis_core::error::{FelisError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| FelisError::config(format!("Failed to build HTTP client: {err}")))
}

/// Joins a base URL (with or without trailing slash) and an absolute path.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub(crate) fn transport_error(err: reqwest::Error, context: &str) -> FelisError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "failed"
    };
    FelisError::Transport(format!("{context} request {kind}: {err}"))
}

/// Returns the body of a successful response, or the status mapped to an
/// error carrying the server message.
pub(crate) async fn success_body(response: Response, context: &str) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| transport_error(err, context))?;

    if status.is_success() {
        return Ok(body);
    }

    let fallback = status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();
    let message = server_message(&body, &fallback);
    tracing::debug!("[{}] HTTP {}: {}", context, status.as_u16(), message);
    Err(FelisError::from_status(status.as_u16(), message))
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("https://api.thecatapi.com/v1/", "/breeds"),
            "https://api.thecatapi.com/v1/breeds"
        );
        assert_eq!(
            endpoint("http://localhost:3000/api", "/auth/login"),
            "http://localhost:3000/api/auth/login"
        );
    }
}
