//! The error taxonomy end to end: 401, 403, 404, network failure, and
//! the project detail all-or-nothing rule.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::ProjectPayload;
use taskdeck::api::{ApiClient, ApiError, auth, projects, tasks, users};
use taskdeck::config::ClientConfig;
use taskdeck_api::project::ProjectId;
use taskdeck_api::task::TaskId;
use taskdeck_stub::server::start_test_server;

async fn setup() -> ApiClient {
    let (addr, _handle) = start_test_server().await;
    let config = ClientConfig {
        base_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let response = auth::register(
        &client,
        &RegisterRequest {
            email: "errors@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "Er".to_string(),
            last_name: "Ror".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);
    client
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let client = setup().await;
    client.clear_token();
    let err = users::profile(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let client = setup().await;
    client.set_token("not-a-real-token");
    let err = tasks::list_all(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn unknown_ids_are_not_found_with_messages() {
    let client = setup().await;

    let err = tasks::get(&client, &TaskId::new("missing")).await.unwrap_err();
    match err {
        ApiError::NotFound(message) => assert_eq!(message, "Task not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let err = projects::get(&client, &ProjectId::new("missing")).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn network_failure_is_a_connectivity_error() {
    // Nothing listens on this port.
    let config = ClientConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    client.set_token("irrelevant");

    let err = tasks::list_all(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.user_message().contains("connection"));
}

#[tokio::test]
async fn project_detail_is_all_or_nothing() {
    let client = setup().await;
    let project = projects::create(
        &client,
        &ProjectPayload {
            name: "Detail".to_string(),
            description: "Loads as one unit or not at all".to_string(),
            color: "#F97316".to_string(),
        },
    )
    .await
    .unwrap();

    // Complete load: all three legs succeed together.
    let loaded = tokio::try_join!(
        projects::get(&client, &project.id),
        tasks::project_tasks(&client, &project.id),
        projects::members(&client, &project.id),
    );
    assert!(loaded.is_ok());

    // Once the project is gone every leg fails, so the combined load
    // fails and the caller must fall back to the project list.
    projects::delete(&client, &project.id).await.unwrap();
    let unavailable = tokio::try_join!(
        projects::get(&client, &project.id),
        tasks::project_tasks(&client, &project.id),
        projects::members(&client, &project.id),
    );
    assert!(unavailable.is_err());
}
