//! Board projection and drop-driven moves against live server state.
//!
//! The flow under test is the board's contract: project columns from
//! the flat list, resolve a drop to a status change, issue exactly one
//! update carrying only the status, then re-render from the refreshed
//! authoritative list.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::ProjectPayload;
use taskdeck::api::{ApiClient, auth, projects, tasks};
use taskdeck::config::ClientConfig;
use taskdeck::store::TaskStore;
use taskdeck_api::board::{DropEvent, column_tasks, resolve_drop};
use taskdeck_api::form::TaskPayload;
use taskdeck_api::project::Project;
use taskdeck_api::task::{Task, TaskPriority, TaskStatus};
use taskdeck_stub::server::start_test_server;

async fn setup() -> (ApiClient, Project) {
    let (addr, _handle) = start_test_server().await;
    let config = ClientConfig {
        base_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let response = auth::register(
        &client,
        &RegisterRequest {
            email: "board@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "Bo".to_string(),
            last_name: "Ard".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);

    let project = projects::create(
        &client,
        &ProjectPayload {
            name: "Board project".to_string(),
            description: "Tasks for the board flow".to_string(),
            color: "#10B981".to_string(),
        },
    )
    .await
    .unwrap();
    (client, project)
}

async fn create_task(
    client: &ApiClient,
    project: &Project,
    title: &str,
    status: TaskStatus,
    position: i64,
) -> Task {
    tasks::create(
        client,
        &TaskPayload {
            title: Some(title.to_string()),
            project_id: Some(project.id.clone()),
            status: Some(status),
            priority: Some(TaskPriority::Medium),
            position: Some(position),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn columns_order_by_position() {
    let (client, project) = setup().await;
    create_task(&client, &project, "Second", TaskStatus::Todo, 2).await;
    create_task(&client, &project, "First", TaskStatus::Todo, 1).await;
    create_task(&client, &project, "Elsewhere", TaskStatus::Done, 1).await;

    let mut store = TaskStore::new();
    store.set(tasks::project_tasks(&client, &project.id).await.unwrap());

    let todo = column_tasks(store.all(), TaskStatus::Todo);
    let titles: Vec<&str> = todo.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
    assert_eq!(column_tasks(store.all(), TaskStatus::Done).len(), 1);
}

#[tokio::test]
async fn drop_on_column_moves_task_with_status_only_update() {
    let (client, project) = setup().await;
    let dragged = create_task(&client, &project, "Movable", TaskStatus::Todo, 1).await;

    let mut store = TaskStore::new();
    store.set(tasks::project_tasks(&client, &project.id).await.unwrap());

    let event = DropEvent {
        dragged_id: dragged.id.clone(),
        drop_target_id: "DONE".to_string(),
    };
    let new_status = resolve_drop(store.all(), &event).unwrap();
    assert_eq!(new_status, TaskStatus::Done);

    // Exactly one update carrying only the new status.
    let updated = tasks::update(&client, &dragged.id, &TaskPayload::with_status(new_status))
        .await
        .unwrap();
    store.replace(updated);

    // Re-rendered from authoritative state: the card switched columns
    // and every other field survived.
    let done = column_tasks(store.all(), TaskStatus::Done);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "Movable");
    assert_eq!(done[0].position, Some(1));
    assert!(column_tasks(store.all(), TaskStatus::Todo).is_empty());
}

#[tokio::test]
async fn drop_on_current_column_issues_no_call() {
    let (client, project) = setup().await;
    let dragged = create_task(&client, &project, "Stay", TaskStatus::Todo, 1).await;

    let store_snapshot = tasks::project_tasks(&client, &project.id).await.unwrap();
    let event = DropEvent {
        dragged_id: dragged.id.clone(),
        drop_target_id: "TODO".to_string(),
    };
    assert_eq!(resolve_drop(&store_snapshot, &event), None);

    // Nothing was sent, so the server copy is bit-for-bit unchanged.
    let fetched = tasks::get(&client, &dragged.id).await.unwrap();
    assert_eq!(fetched, dragged);
}

#[tokio::test]
async fn drop_on_task_adopts_that_tasks_column() {
    let (client, project) = setup().await;
    let dragged = create_task(&client, &project, "Dragged", TaskStatus::Todo, 1).await;
    let target = create_task(&client, &project, "Target", TaskStatus::InReview, 1).await;

    let snapshot = tasks::project_tasks(&client, &project.id).await.unwrap();
    let event = DropEvent {
        dragged_id: dragged.id.clone(),
        drop_target_id: target.id.to_string(),
    };
    assert_eq!(resolve_drop(&snapshot, &event), Some(TaskStatus::InReview));
}

#[tokio::test]
async fn drop_on_unknown_target_is_rejected_silently() {
    let (client, project) = setup().await;
    let dragged = create_task(&client, &project, "Dragged", TaskStatus::Todo, 1).await;

    let snapshot = tasks::project_tasks(&client, &project.id).await.unwrap();
    let event = DropEvent {
        dragged_id: dragged.id.clone(),
        drop_target_id: "not-a-column-or-task".to_string(),
    };
    assert_eq!(resolve_drop(&snapshot, &event), None);
}

#[tokio::test]
async fn failed_move_leaves_last_known_good_state() {
    let (client, project) = setup().await;
    let dragged = create_task(&client, &project, "Fragile", TaskStatus::Todo, 1).await;

    let mut store = TaskStore::new();
    store.set(tasks::project_tasks(&client, &project.id).await.unwrap());

    // The task disappears server-side before the move lands.
    tasks::delete(&client, &dragged.id).await.unwrap();
    let result = tasks::update(
        &client,
        &dragged.id,
        &TaskPayload::with_status(TaskStatus::Done),
    )
    .await;
    assert!(result.is_err());

    // The mirrored list was never touched: the card is still rendered in
    // its old column until a refetch says otherwise.
    let todo = column_tasks(store.all(), TaskStatus::Todo);
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].title, "Fragile");
}
