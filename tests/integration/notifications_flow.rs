//! Notification listing, counts, and the monotonic read flag.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::ProjectPayload;
use taskdeck::api::{ApiClient, auth, notifications, projects, tasks, users};
use taskdeck::config::ClientConfig;
use taskdeck::store::NotificationStore;
use taskdeck_api::form::TaskPayload;
use taskdeck_api::task::{TaskPriority, TaskStatus};
use taskdeck_api::user::User;
use taskdeck_stub::server::start_test_server;

/// Registers two users and assigns a task from the first to the second,
/// producing one notification for the assignee. Returns (owner client,
/// assignee client, assignee).
async fn setup() -> (ApiClient, ApiClient, User) {
    let (addr, _handle) = start_test_server().await;
    let base_url = format!("http://{addr}/api");
    let config = ClientConfig {
        base_url: base_url.clone(),
        ..ClientConfig::default()
    };
    let owner = ApiClient::new(&config).unwrap();
    let assignee = ApiClient::new(&config).unwrap();

    let owner_auth = auth::register(
        &owner,
        &RegisterRequest {
            email: "owner@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "Ow".to_string(),
            last_name: "Ner".to_string(),
        },
    )
    .await
    .unwrap();
    owner.set_token(&owner_auth.token);

    let assignee_auth = auth::register(
        &assignee,
        &RegisterRequest {
            email: "assignee@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "As".to_string(),
            last_name: "Signee".to_string(),
        },
    )
    .await
    .unwrap();
    assignee.set_token(&assignee_auth.token);
    let assignee_user = users::profile(&assignee).await.unwrap();

    let project = projects::create(
        &owner,
        &ProjectPayload {
            name: "Shared work".to_string(),
            description: "Cross-assigned tasks live here".to_string(),
            color: "#F59E0B".to_string(),
        },
    )
    .await
    .unwrap();
    tasks::create(
        &owner,
        &TaskPayload {
            title: Some("Handed over".to_string()),
            project_id: Some(project.id.clone()),
            status: Some(TaskStatus::Todo),
            priority: Some(TaskPriority::High),
            assigned_to_id: Some(assignee_user.id.clone()),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap();

    (owner, assignee, assignee_user)
}

#[tokio::test]
async fn assignment_produces_an_unread_notification() {
    let (_owner, assignee, _user) = setup().await;

    let list = notifications::list(&assignee).await.unwrap();
    assert_eq!(list.len(), 1);
    assert!(!list[0].is_read);
    assert!(list[0].message.contains("Handed over"));
    assert!(list[0].task_id.is_some());

    assert_eq!(notifications::unread_count(&assignee).await.unwrap(), 1);
    assert_eq!(notifications::unread(&assignee).await.unwrap().len(), 1);
}

#[tokio::test]
async fn mark_one_read() {
    let (_owner, assignee, _user) = setup().await;
    let list = notifications::list(&assignee).await.unwrap();

    let updated = notifications::mark_read(&assignee, &list[0].id).await.unwrap();
    assert!(updated.is_read);
    assert_eq!(notifications::unread_count(&assignee).await.unwrap(), 0);
}

#[tokio::test]
async fn mark_all_read_is_monotonic_through_the_store() {
    let (_owner, assignee, _user) = setup().await;

    let mut store = NotificationStore::new();
    store.set(notifications::list(&assignee).await.unwrap());
    assert_eq!(store.unread_count(), 1);

    notifications::mark_all_read(&assignee).await.unwrap();
    store.mark_all_read();

    // A refetch agrees with the mirrored state, and nothing un-reads.
    let refreshed = notifications::list(&assignee).await.unwrap();
    assert!(refreshed.iter().all(|n| n.is_read));
    store.set(refreshed);
    assert_eq!(store.unread_count(), 0);
}

#[tokio::test]
async fn owner_has_no_notifications_for_their_own_assignment() {
    let (owner, _assignee, _user) = setup().await;
    assert_eq!(notifications::unread_count(&owner).await.unwrap(), 0);
}
