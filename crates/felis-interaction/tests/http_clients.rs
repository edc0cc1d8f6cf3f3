//! HTTP adapter tests against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use felis_core::auth::{AuthApi, LoginRequest, RegisterRequest};
use felis_core::catalog::BreedCatalog;
use felis_core::session::SessionStore;
use felis_core::user::AuthUser;
use felis_core::FelisError;
use felis_infrastructure::MemoryStorage;
use felis_interaction::{CatalogClient, HttpAuthApi};
use httpmock::prelude::*;
use serde_json::json;

const TIMEOUT: Duration = Duration::from_secs(5);

fn session_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())))
}

fn login_request() -> LoginRequest {
    LoginRequest {
        email: "test@example.com".into(),
        password: "password123".into(),
    }
}

fn breeds_json() -> serde_json::Value {
    json!([
        {
            "id": "pers",
            "name": "Persian",
            "origin": "Iran (Persia)",
            "temperament": "Affectionate, loyal, Sedate, Quiet",
            "description": "Long-haired.",
            "life_span": "14 - 15",
            "weight": { "imperial": "9 - 14", "metric": "4 - 6" }
        },
        {
            "id": "siam",
            "name": "Siamese",
            "origin": "Thailand",
            "temperament": "Active, Agile, Clever, Sociable, Loving, Energetic, Vocal",
            "description": "Talkative.",
            "life_span": "12 - 15",
            "weight": { "imperial": "8 - 15", "metric": "4 - 7" }
        }
    ])
}

#[tokio::test]
async fn test_login_posts_credentials_and_returns_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "email": "test@example.com", "password": "password123" }));
            then.status(200).json_body(json!({
                "data": {
                    "token": "mock-token",
                    "user": { "id": "1", "email": "test@example.com", "username": "testuser" }
                },
                "message": "Login successful",
                "success": true
            }));
        })
        .await;

    let api = HttpAuthApi::new(server.url("/api"), TIMEOUT).unwrap();
    let response = api.login(&login_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.token, "mock-token");
    assert_eq!(response.user.username.as_deref(), Some("testuser"));
    assert_eq!(response.message.as_deref(), Some("Login successful"));
}

#[tokio::test]
async fn test_login_401_is_unauthorized_with_server_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401).json_body(json!({
                "message": "Invalid credentials",
                "error": "Unauthorized",
                "statusCode": 401
            }));
        })
        .await;

    let api = HttpAuthApi::new(server.url("/api"), TIMEOUT).unwrap();
    let err = api.login(&login_request()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_register_conflict_keeps_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/register")
                .json_body(json!({
                    "email": "new@example.com",
                    "username": "newuser",
                    "password": "password123"
                }));
            then.status(409)
                .json_body(json!({ "error": "Email already registered" }));
        })
        .await;

    let api = HttpAuthApi::new(server.url("/api"), TIMEOUT).unwrap();
    let request = RegisterRequest {
        email: "new@example.com".into(),
        username: "newuser".into(),
        password: "password123".into(),
        first_name: None,
        last_name: None,
    };
    let err = api.register(&request).await.unwrap_err();

    assert_eq!(
        err,
        FelisError::Http {
            status: 409,
            message: "Email already registered".into()
        }
    );
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let api = HttpAuthApi::new("http://127.0.0.1:1", TIMEOUT).unwrap();
    let err = api.login(&login_request()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_list_breeds_sends_api_key_and_session_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/breeds")
                .header("x-api-key", "live_test")
                .header("authorization", "Bearer mock-token");
            then.status(200).json_body(breeds_json());
        })
        .await;

    let session = session_store();
    session
        .set_session(
            AuthUser {
                id: "1".into(),
                email: "test@example.com".into(),
                ..Default::default()
            },
            "mock-token",
        )
        .unwrap();

    let client = CatalogClient::new(server.url("/v1"), "live_test", TIMEOUT, session).unwrap();
    let breeds = client.list_breeds().await.unwrap();

    mock.assert_async().await;
    assert_eq!(breeds.len(), 2);
    assert_eq!(breeds[1].origin, "Thailand");
    assert_eq!(breeds[0].weight.metric, "4 - 6");
}

#[tokio::test]
async fn test_token_is_reread_after_logout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/breeds")
                .header_exists("authorization");
            then.status(200).json_body(breeds_json());
        })
        .await;

    let session = session_store();
    session
        .set_session(
            AuthUser {
                id: "1".into(),
                email: "test@example.com".into(),
                ..Default::default()
            },
            "mock-token",
        )
        .unwrap();
    let client =
        CatalogClient::new(server.url("/v1"), "live_test", TIMEOUT, session.clone()).unwrap();
    assert!(client.list_breeds().await.is_ok());

    session.clear().unwrap();

    // Only requests with an authorization header are served.
    let err = client.list_breeds().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_breed_images_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/images/imagesbybreedid")
                .query_param("breed_id", "siam")
                .query_param("limit", "5");
            then.status(200).json_body(json!([
                { "id": "img1", "url": "https://cdn2.thecatapi.com/images/img1.jpg", "width": 800, "height": 600 },
                { "id": "img2", "url": "https://cdn2.thecatapi.com/images/img2.jpg" }
            ]));
        })
        .await;

    let client = CatalogClient::new(server.url("/v1"), "k", TIMEOUT, session_store()).unwrap();
    let images = client.breed_images("siam", 5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].width, 800);
    assert_eq!(images[1].height, 0);
}

#[tokio::test]
async fn test_breed_images_zero_limit_never_hits_network() {
    let client =
        CatalogClient::new("http://127.0.0.1:1", "k", TIMEOUT, session_store()).unwrap();
    assert!(client.breed_images("siam", 0).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_search_breeds_encodes_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/breeds/search")
                .query_param("q", "scottish fold");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = CatalogClient::new(server.url("/v1"), "k", TIMEOUT, session_store()).unwrap();
    let breeds = client.search_breeds("scottish fold").await.unwrap();

    mock.assert_async().await;
    assert!(breeds.is_empty());
}

#[tokio::test]
async fn test_breed_by_id_404() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/breeds/nope");
            then.status(404).body("");
        })
        .await;

    let client = CatalogClient::new(server.url("/v1"), "k", TIMEOUT, session_store()).unwrap();
    let err = client.breed_by_id("nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Not Found");
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/breeds");
            then.status(200).body("not json");
        })
        .await;

    let client = CatalogClient::new(server.url("/v1"), "k", TIMEOUT, session_store()).unwrap();
    assert!(client.list_breeds().await.unwrap_err().is_serialization());
}
