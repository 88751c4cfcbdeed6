//! Comment thread and the reaction state machine end to end.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::ProjectPayload;
use taskdeck::api::{ApiClient, auth, projects, tasks};
use taskdeck::config::ClientConfig;
use taskdeck::store::CommentStore;
use taskdeck_api::comment::NewComment;
use taskdeck_api::form::TaskPayload;
use taskdeck_api::reaction::Reaction;
use taskdeck_api::task::{Task, TaskPriority, TaskStatus};
use taskdeck_stub::server::start_test_server;

async fn setup() -> (ApiClient, Task) {
    let (addr, _handle) = start_test_server().await;
    let config = ClientConfig {
        base_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let response = auth::register(
        &client,
        &RegisterRequest {
            email: "commenter@example.com".to_string(),
            password: "abcdef".to_string(),
            first_name: "Co".to_string(),
            last_name: "Mm".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);

    let project = projects::create(
        &client,
        &ProjectPayload {
            name: "Discussion".to_string(),
            description: "Somewhere to talk about work".to_string(),
            color: "#8B5CF6".to_string(),
        },
    )
    .await
    .unwrap();
    let task = tasks::create(
        &client,
        &TaskPayload {
            title: Some("Discussed task".to_string()),
            project_id: Some(project.id.clone()),
            status: Some(TaskStatus::Todo),
            priority: Some(TaskPriority::Medium),
            ..TaskPayload::default()
        },
    )
    .await
    .unwrap();
    (client, task)
}

#[tokio::test]
async fn post_and_list_comments() {
    let (client, task) = setup().await;

    let posted = tasks::add_comment(
        &client,
        &task.id,
        &NewComment {
            text: "Looks good to me".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(posted.task_id, task.id);
    assert_eq!(posted.likes_count, 0);
    assert!(posted.user_reaction.is_none());

    let listed = tasks::comments(&client, &task.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, "Looks good to me");
}

#[tokio::test]
async fn like_then_dislike_ends_disliked_with_original_like_count() {
    let (client, task) = setup().await;
    let comment = tasks::add_comment(
        &client,
        &task.id,
        &NewComment {
            text: "Contested".to_string(),
        },
    )
    .await
    .unwrap();
    let original_likes = comment.likes_count;
    let original_dislikes = comment.dislikes_count;

    let liked = tasks::like_comment(&client, &comment.id).await.unwrap();
    assert_eq!(liked.likes_count, original_likes + 1);
    assert_eq!(liked.user_reaction, Some(Reaction::Like));

    let disliked = tasks::dislike_comment(&client, &comment.id).await.unwrap();
    // Like count back at its original value, dislikes up by one.
    assert_eq!(disliked.likes_count, original_likes);
    assert_eq!(disliked.dislikes_count, original_dislikes + 1);
    assert_eq!(disliked.user_reaction, Some(Reaction::Dislike));
}

#[tokio::test]
async fn repeated_like_is_idempotent() {
    let (client, task) = setup().await;
    let comment = tasks::add_comment(
        &client,
        &task.id,
        &NewComment {
            text: "Agreed".to_string(),
        },
    )
    .await
    .unwrap();

    tasks::like_comment(&client, &comment.id).await.unwrap();
    let again = tasks::like_comment(&client, &comment.id).await.unwrap();
    assert_eq!(again.likes_count, 1);
    assert_eq!(again.user_reaction, Some(Reaction::Like));
}

#[tokio::test]
async fn store_replaces_comment_with_server_response() {
    let (client, task) = setup().await;
    let comment = tasks::add_comment(
        &client,
        &task.id,
        &NewComment {
            text: "Replace me".to_string(),
        },
    )
    .await
    .unwrap();

    let mut store = CommentStore::new();
    store.set(
        task.id.clone(),
        tasks::comments(&client, &task.id).await.unwrap(),
    );

    // The client never guesses counts; it installs the returned record.
    let updated = tasks::like_comment(&client, &comment.id).await.unwrap();
    store.replace(updated);

    let mirrored = store.get(&comment.id).unwrap();
    assert_eq!(mirrored.likes_count, 1);
    assert_eq!(mirrored.user_reaction, Some(Reaction::Like));
}
