//! Task CRUD through the service layer, with the mirrored store kept in
//! sync the way the board screen does it.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::ProjectPayload;
use taskdeck::api::tasks::TaskFilter;
use taskdeck::api::{ApiClient, auth, projects, tasks, users};
use taskdeck::config::ClientConfig;
use taskdeck::store::TaskStore;
use taskdeck_api::form::{TaskForm, TaskPayload};
use taskdeck_api::project::Project;
use taskdeck_api::task::{TaskPriority, TaskStatus};
use taskdeck_api::user::User;
use taskdeck_stub::server::start_test_server;

async fn setup() -> (ApiClient, User, Project) {
    let (addr, _handle) = start_test_server().await;
    let config = ClientConfig {
        base_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let response = auth::register(
        &client,
        &RegisterRequest {
            email: "jo@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Doe".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);
    let user = users::profile(&client).await.unwrap();

    let project = projects::create(
        &client,
        &ProjectPayload {
            name: "Website redesign".to_string(),
            description: "Refresh the marketing site".to_string(),
            color: "#3B82F6".to_string(),
        },
    )
    .await
    .unwrap();

    (client, user, project)
}

#[tokio::test]
async fn create_from_form_round_trips_normalized_fields() {
    let (client, _user, project) = setup().await;

    let form = TaskForm {
        title: "Ship the landing page".to_string(),
        status: "TODO".to_string(),
        priority: "HIGH".to_string(),
        project_id: project.id.to_string(),
        due_date: "2031-06-01".to_string(),
        estimated_hours: "3".to_string(),
        ..TaskForm::default()
    };
    let created = tasks::create(&client, &form.to_payload()).await.unwrap();

    assert_eq!(created.title, "Ship the landing page");
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.priority, TaskPriority::High);
    // The normalizer appended the midnight time component.
    assert_eq!(created.due_date.as_deref(), Some("2031-06-01T00:00:00"));
    assert_eq!(created.estimated_hours, Some(3.0));
    // Blank optional fields were never sent.
    assert!(created.description.is_none());
    assert!(created.assigned_to_id.is_none());

    let fetched = tasks::get(&client, &created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn store_mirrors_create_update_delete() {
    let (client, _user, project) = setup().await;
    let mut store = TaskStore::new();

    store.set(tasks::project_tasks(&client, &project.id).await.unwrap());
    assert!(store.is_empty());

    let created = tasks::create(
        &client,
        &TaskPayload {
            title: Some("First".to_string()),
            project_id: Some(project.id.clone()),
            status: Some(TaskStatus::Todo),
            priority: Some(TaskPriority::Medium),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap();
    store.insert(created.clone());
    assert_eq!(store.len(), 1);

    let updated = tasks::update(
        &client,
        &created.id,
        &TaskPayload {
            title: Some("First, renamed".to_string()),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap();
    store.replace(updated);
    assert_eq!(store.all()[0].title, "First, renamed");
    // Untouched fields survive a partial update.
    assert_eq!(store.all()[0].status, TaskStatus::Todo);

    tasks::delete(&client, &created.id).await.unwrap();
    store.remove(&created.id);
    assert!(store.is_empty());

    // The server agrees the task is gone.
    assert!(tasks::get(&client, &created.id).await.is_err());
}

#[tokio::test]
async fn filter_narrows_by_status_and_search() {
    let (client, _user, project) = setup().await;

    for (title, status) in [
        ("Fix login redirect", TaskStatus::Todo),
        ("Write docs", TaskStatus::Todo),
        ("Deploy staging", TaskStatus::Done),
    ] {
        tasks::create(
            &client,
            &TaskPayload {
                title: Some(title.to_string()),
                project_id: Some(project.id.clone()),
                status: Some(status),
                priority: Some(TaskPriority::Medium),
                ..TaskPayload::default()
            },
        )
        .await
        .unwrap();
    }

    let todo = tasks::filter(
        &client,
        &TaskFilter {
            status: Some(TaskStatus::Todo),
            ..TaskFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(todo.len(), 2);

    let login = tasks::filter(
        &client,
        &TaskFilter {
            search: Some("login".to_string()),
            ..TaskFilter::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(login.len(), 1);
    assert_eq!(login[0].title, "Fix login redirect");
}

#[tokio::test]
async fn statistics_count_by_status() {
    let (client, _user, project) = setup().await;

    for status in [TaskStatus::Todo, TaskStatus::Todo, TaskStatus::Done] {
        tasks::create(
            &client,
            &TaskPayload {
                title: Some("Counted".to_string()),
                project_id: Some(project.id.clone()),
                status: Some(status),
                priority: Some(TaskPriority::Low),
                ..TaskPayload::default()
            },
        )
        .await
        .unwrap();
    }

    let stats = tasks::statistics(&client, &project.id).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.todo, 2);
    assert_eq!(stats.done, 1);
    assert_eq!(stats.in_progress, 0);
}

#[tokio::test]
async fn user_statistics_track_assignments() {
    let (client, user, project) = setup().await;

    tasks::create(
        &client,
        &TaskPayload {
            title: Some("Mine".to_string()),
            project_id: Some(project.id.clone()),
            status: Some(TaskStatus::Done),
            priority: Some(TaskPriority::Low),
            assigned_to_id: Some(user.id.clone()),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap();

    let stats = users::statistics(&client).await.unwrap();
    assert_eq!(stats.total_projects, 1);
    assert_eq!(stats.total_tasks, 1);
    assert_eq!(stats.completed_tasks, 1);
}
