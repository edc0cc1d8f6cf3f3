//! Wire models of the auth backend.

use serde::{Deserialize, Serialize};

use crate::user::AuthUser;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// `{ data, message?, success }` envelope used by every auth endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// `data` of a login or registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: AuthUser,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Extracts the human readable message of an error response.
///
/// Prefers `message`, then `error`, then the raw body. An empty body yields
/// `fallback`.
pub fn server_message(body: &str, fallback: &str) -> String {
    let non_blank = |field: Option<String>| field.filter(|m| !m.trim().is_empty());
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    parsed
        .and_then(|b| non_blank(b.message).or_else(|| non_blank(b.error)))
        .or_else(|| {
            let raw = body.trim();
            (!raw.is_empty()).then(|| raw.to_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_login_response() {
        let json = r#"{
            "data": { "token": "mock-token", "user": { "id": "1", "username": "testuser", "email": "test@example.com" } },
            "message": "Login successful",
            "success": true
        }"#;
        let envelope: ApiEnvelope<AuthPayload> = serde_json::from_str(json).unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Login successful"));
        let data = envelope.data.unwrap();
        assert_eq!(data.token, "mock-token");
        assert_eq!(data.user.username.as_deref(), Some("testuser"));
    }

    #[test]
    fn test_register_request_wire_shape() {
        let request = RegisterRequest {
            email: "new@example.com".into(),
            username: "newuser".into(),
            password: "password123".into(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "email": "new@example.com",
                "username": "newuser",
                "password": "password123"
            })
        );
    }

    #[test]
    fn test_server_message_priority() {
        assert_eq!(
            server_message(r#"{"message":"Invalid credentials","error":"Unauthorized"}"#, "x"),
            "Invalid credentials"
        );
        assert_eq!(
            server_message(r#"{"error":"Email already taken","statusCode":409}"#, "x"),
            "Email already taken"
        );
        assert_eq!(server_message("Unauthorized", "x"), "Unauthorized");
        assert_eq!(server_message("", "Request failed"), "Request failed");
    }

    #[test]
    fn test_server_message_skips_blank_message() {
        assert_eq!(
            server_message(r#"{"message":"","error":"Email taken"}"#, "x"),
            "Email taken"
        );
        assert_eq!(
            server_message(r#"{"message":"  ","error":"Unauthorized"}"#, "x"),
            "Unauthorized"
        );
    }
}
