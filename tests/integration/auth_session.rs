//! End-to-end auth flow: register, session persistence, restore, logout.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::path::PathBuf;

use taskdeck::api::auth::{LoginRequest, RegisterRequest};
use taskdeck::api::{ApiClient, ApiError, auth, users};
use taskdeck::config::ClientConfig;
use taskdeck::session::SessionStore;
use taskdeck_stub::server::start_test_server;

async fn setup() -> (ApiClient, SocketAddr) {
    let (addr, _handle) = start_test_server().await;
    let config = ClientConfig {
        base_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    (ApiClient::new(&config).unwrap(), addr)
}

fn temp_session(tag: &str) -> SessionStore {
    let dir = std::env::temp_dir().join(format!(
        "taskdeck-test-{}-{}-{tag}",
        std::process::id(),
        uuid::Uuid::now_v7()
    ));
    SessionStore::open(Some(PathBuf::from(dir))).unwrap()
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        email: "a@b.com".to_string(),
        password: "abcdef".to_string(),
        first_name: "Jo".to_string(),
        last_name: "Do".to_string(),
    }
}

#[tokio::test]
async fn register_stores_token_and_fetches_matching_profile() {
    let (client, _addr) = setup().await;
    let session = temp_session("register");

    let response = auth::register(&client, &register_request()).await.unwrap();
    assert!(!response.token.is_empty());

    client.set_token(&response.token);
    let profile = users::profile(&client).await.unwrap();
    assert_eq!(profile.first_name, "Jo");
    assert_eq!(profile.last_name, "Do");
    assert_eq!(profile.email, "a@b.com");

    session.store(&response.token, &profile).unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some(response.token.as_str()));
    assert_eq!(session.user().unwrap().first_name, "Jo");
}

#[tokio::test]
async fn login_round_trip() {
    let (client, _addr) = setup().await;
    auth::register(&client, &register_request()).await.unwrap();
    client.clear_token();

    let response = auth::login(
        &client,
        &LoginRequest {
            email: "a@b.com".to_string(),
            password: "abcdef".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);
    let profile = users::profile(&client).await.unwrap();
    assert_eq!(profile.email, "a@b.com");
}

#[tokio::test]
async fn login_with_bad_password_is_unauthorized() {
    let (client, _addr) = setup().await;
    auth::register(&client, &register_request()).await.unwrap();

    let err = auth::login(
        &client,
        &LoginRequest {
            email: "a@b.com".to_string(),
            password: "wrong!".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (client, _addr) = setup().await;
    auth::register(&client, &register_request()).await.unwrap();

    let err = auth::register(&client, &register_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn logout_clears_local_state_even_without_a_server_session() {
    let (client, _addr) = setup().await;
    let session = temp_session("logout");

    let response = auth::register(&client, &register_request()).await.unwrap();
    client.set_token(&response.token);
    let profile = users::profile(&client).await.unwrap();
    session.store(&response.token, &profile).unwrap();

    // Best-effort server call followed by unconditional local clear.
    auth::logout(&client).await;
    client.clear_token();
    session.clear();

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());

    // The server-side token is gone too.
    client.set_token(&response.token);
    let err = users::profile(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn logout_against_unreachable_server_still_clears_local_state() {
    // A port nothing listens on: the remote call fails, the local clear runs.
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let session = temp_session("offline-logout");
    session
        .store(
            "stale-token",
            &taskdeck_api::user::User {
                id: taskdeck_api::user::UserId::new("u-1"),
                email: "a@b.com".to_string(),
                first_name: "Jo".to_string(),
                last_name: "Do".to_string(),
                role: None,
            },
        )
        .unwrap();

    auth::logout(&client).await;
    session.clear();
    assert!(!session.is_authenticated());
}
