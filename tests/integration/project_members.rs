//! Project membership: roles, permission checks, duplicate handling.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::api::auth::RegisterRequest;
use taskdeck::api::projects::{AddMemberRequest, ProjectPayload};
use taskdeck::api::{ApiClient, ApiError, auth, projects, users};
use taskdeck::config::ClientConfig;
use taskdeck_api::project::{Project, ProjectRole, can_delete, can_edit};
use taskdeck_api::user::User;
use taskdeck_stub::server::start_test_server;

async fn client_for(base_url: &str, email: &str) -> (ApiClient, User) {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();
    let response = auth::register(
        &client,
        &RegisterRequest {
            email: email.to_string(),
            password: "abcdef".to_string(),
            first_name: "Me".to_string(),
            last_name: "Mber".to_string(),
        },
    )
    .await
    .unwrap();
    client.set_token(&response.token);
    let user = users::profile(&client).await.unwrap();
    (client, user)
}

async fn setup() -> (String, ApiClient, User, Project) {
    let (addr, _handle) = start_test_server().await;
    let base_url = format!("http://{addr}/api");
    let (owner, owner_user) = client_for(&base_url, "owner@example.com").await;
    let project = projects::create(
        &owner,
        &ProjectPayload {
            name: "Membership".to_string(),
            description: "Role management under test".to_string(),
            color: "#EC4899".to_string(),
        },
    )
    .await
    .unwrap();
    (base_url, owner, owner_user, project)
}

#[tokio::test]
async fn creator_is_the_single_owner_member() {
    let (_base, owner, owner_user, project) = setup().await;
    let members = projects::members(&owner, &project.id).await.unwrap();

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].role, ProjectRole::Owner);
    assert_eq!(members[0].user_id, owner_user.id);
    assert_eq!(
        members
            .iter()
            .filter(|m| m.role == ProjectRole::Owner)
            .count(),
        1
    );
}

#[tokio::test]
async fn add_member_and_change_role() {
    let (base, owner, _owner_user, project) = setup().await;
    let (_viewer_client, viewer) = client_for(&base, "viewer@example.com").await;

    let member = projects::add_member(
        &owner,
        &project.id,
        &AddMemberRequest {
            user_id: viewer.id.clone(),
            role: ProjectRole::Viewer,
        },
    )
    .await
    .unwrap();
    assert_eq!(member.role, ProjectRole::Viewer);

    let promoted = projects::update_member_role(&owner, &project.id, &member.id, ProjectRole::Editor)
        .await
        .unwrap();
    assert_eq!(promoted.role, ProjectRole::Editor);
}

#[tokio::test]
async fn duplicate_member_surfaces_the_server_message() {
    let (base, owner, _owner_user, project) = setup().await;
    let (_c, other) = client_for(&base, "dup@example.com").await;

    let request = AddMemberRequest {
        user_id: other.id.clone(),
        role: ProjectRole::Viewer,
    };
    projects::add_member(&owner, &project.id, &request).await.unwrap();
    let err = projects::add_member(&owner, &project.id, &request).await.unwrap_err();

    match err {
        ApiError::Conflict(message) => {
            assert_eq!(message, "User is already a member of this project");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn viewer_cannot_mutate_project_metadata() {
    let (base, owner, _owner_user, project) = setup().await;
    let (viewer_client, viewer) = client_for(&base, "viewer2@example.com").await;
    projects::add_member(
        &owner,
        &project.id,
        &AddMemberRequest {
            user_id: viewer.id.clone(),
            role: ProjectRole::Viewer,
        },
    )
    .await
    .unwrap();

    let err = projects::update(
        &viewer_client,
        &project.id,
        &ProjectPayload {
            name: "Hijacked".to_string(),
            description: "Should not be possible".to_string(),
            color: "#000000".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    // The client-side permission helpers agree with the server.
    let members = projects::members(&owner, &project.id).await.unwrap();
    assert!(!can_edit(&project, &members, &viewer.id));
}

#[tokio::test]
async fn editor_can_edit_but_only_owner_deletes() {
    let (base, owner, owner_user, project) = setup().await;
    let (editor_client, editor) = client_for(&base, "editor@example.com").await;
    projects::add_member(
        &owner,
        &project.id,
        &AddMemberRequest {
            user_id: editor.id.clone(),
            role: ProjectRole::Editor,
        },
    )
    .await
    .unwrap();

    let renamed = projects::update(
        &editor_client,
        &project.id,
        &ProjectPayload {
            name: "Renamed by editor".to_string(),
            description: "Editors may touch metadata".to_string(),
            color: "#14B8A6".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.name, "Renamed by editor");

    let err = projects::delete(&editor_client, &project.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    let members = projects::members(&owner, &project.id).await.unwrap();
    assert!(can_edit(&renamed, &members, &editor.id));
    assert!(!can_delete(&renamed, &editor.id));
    assert!(can_delete(&renamed, &owner_user.id));

    projects::delete(&owner, &project.id).await.unwrap();
    let err = projects::get(&owner, &project.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn only_owner_removes_members() {
    let (base, owner, _owner_user, project) = setup().await;
    let (editor_client, editor) = client_for(&base, "remover@example.com").await;
    let member = projects::add_member(
        &owner,
        &project.id,
        &AddMemberRequest {
            user_id: editor.id.clone(),
            role: ProjectRole::Editor,
        },
    )
    .await
    .unwrap();

    let err = projects::remove_member(&editor_client, &project.id, &member.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));

    projects::remove_member(&owner, &project.id, &member.id).await.unwrap();
    let members = projects::members(&owner, &project.id).await.unwrap();
    assert_eq!(members.len(), 1);
}
