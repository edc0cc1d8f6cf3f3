//! UserProfile domain model.
//!
//! The auth backend answers with a loose `AuthUser` shape (optional names,
//! `username` and/or `userName`), while stored profiles use the full shape.
//! Both end up as one canonical [`UserProfile`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical user profile held by the session.
///
/// Serialized in camelCase, which is also the full "User" wire shape, so a
/// persisted profile deserializes back into this type unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned by the auth endpoints.
///
/// Every field except `id` and `email` may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default, rename = "username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Normalizes an `AuthUser` into the canonical shape.
    ///
    /// `userName` wins over `username`; missing names become empty strings and
    /// missing timestamps become `now`.
    pub fn from_auth_user(user: AuthUser, now: DateTime<Utc>) -> Self {
        let user_name = user
            .user_name
            .filter(|name| !name.is_empty())
            .or(user.username)
            .unwrap_or_default();

        Self {
            id: user.id,
            email: user.email,
            user_name,
            first_name: user.first_name.unwrap_or_default(),
            last_name: user.last_name.unwrap_or_default(),
            created_at: user.created_at.unwrap_or(now),
            updated_at: user.updated_at.unwrap_or(now),
        }
    }

    /// First and last name separated by a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Upper-cased first letters of first and last name.
    ///
    /// Falls back to the first letter of the user name when both names are
    /// empty.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.chars().next())
            .collect();

        if initials.is_empty() {
            self.user_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default()
        } else {
            initials.to_uppercase()
        }
    }
}

impl From<AuthUser> for UserProfile {
    fn from(user: AuthUser) -> Self {
        Self::from_auth_user(user, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_minimal_auth_user_gets_defaults() {
        let json = r#"{"id":"1","username":"testuser","email":"test@example.com"}"#;
        let auth: AuthUser = serde_json::from_str(json).unwrap();

        let profile = UserProfile::from_auth_user(auth, fixed_now());

        assert_eq!(profile.id, "1");
        assert_eq!(profile.user_name, "testuser");
        assert_eq!(profile.first_name, "");
        assert_eq!(profile.last_name, "");
        assert_eq!(profile.created_at, fixed_now());
        assert_eq!(profile.updated_at, fixed_now());
    }

    #[test]
    fn test_user_name_preferred_over_username() {
        let auth = AuthUser {
            id: "7".into(),
            email: "a@b.c".into(),
            username: Some("lower".into()),
            user_name: Some("Camel".into()),
            ..Default::default()
        };

        let profile = UserProfile::from_auth_user(auth, fixed_now());
        assert_eq!(profile.user_name, "Camel");
    }

    #[test]
    fn test_full_user_shape_deserializes_into_profile() {
        let json = r#"{
            "id": "1",
            "email": "test@example.com",
            "userName": "testuser",
            "firstName": "Test",
            "lastName": "User",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T03:04:05Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name(), "Test User");
        assert_eq!(profile.initials(), "TU");

        // The same document is also a valid AuthUser and normalizes identically.
        let auth: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(UserProfile::from_auth_user(auth, fixed_now()), profile);
    }

    #[test]
    fn test_initials_fall_back_to_user_name() {
        let profile = UserProfile::from_auth_user(
            AuthUser {
                id: "1".into(),
                email: "m@x.io".into(),
                username: Some("mittens".into()),
                ..Default::default()
            },
            fixed_now(),
        );
        assert_eq!(profile.initials(), "M");
        assert_eq!(profile.full_name(), "");
    }
}
