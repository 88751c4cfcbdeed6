//! Project and membership endpoints.

use serde::Serialize;

use taskdeck_api::endpoints;
use taskdeck_api::project::{Project, ProjectId, ProjectMember, ProjectRole};
use taskdeck_api::user::UserId;

use super::{ApiClient, ApiError};

/// Payload for creating or updating a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPayload {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Display color hex string.
    pub color: String,
}

/// Payload for adding a member to a project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    /// User to add.
    pub user_id: UserId,
    /// Role to grant.
    pub role: ProjectRole,
}

/// Body for `PUT .../members/{memberId}/role`.
#[derive(Debug, Clone, Serialize)]
struct RoleChange {
    role: ProjectRole,
}

/// Lists the authenticated user's projects.
pub async fn list(client: &ApiClient) -> Result<Vec<Project>, ApiError> {
    client.get(endpoints::PROJECTS).await
}

/// Fetches a single project.
pub async fn get(client: &ApiClient, id: &ProjectId) -> Result<Project, ApiError> {
    client.get(&endpoints::project(id)).await
}

/// Creates a project; the creator becomes its owner.
pub async fn create(client: &ApiClient, payload: &ProjectPayload) -> Result<Project, ApiError> {
    client.post(endpoints::PROJECTS, payload).await
}

/// Updates a project's metadata.
pub async fn update(
    client: &ApiClient,
    id: &ProjectId,
    payload: &ProjectPayload,
) -> Result<Project, ApiError> {
    client.put(&endpoints::project(id), payload).await
}

/// Deletes a project. Owner only.
pub async fn delete(client: &ApiClient, id: &ProjectId) -> Result<(), ApiError> {
    client.delete(&endpoints::project(id)).await
}

/// Lists a project's members.
pub async fn members(client: &ApiClient, id: &ProjectId) -> Result<Vec<ProjectMember>, ApiError> {
    client.get(&endpoints::project_members(id)).await
}

/// Adds a member to a project.
pub async fn add_member(
    client: &ApiClient,
    id: &ProjectId,
    request: &AddMemberRequest,
) -> Result<ProjectMember, ApiError> {
    client.post(&endpoints::project_members(id), request).await
}

/// Changes a member's role.
pub async fn update_member_role(
    client: &ApiClient,
    project_id: &ProjectId,
    member_id: &str,
    role: ProjectRole,
) -> Result<ProjectMember, ApiError> {
    client
        .put(
            &endpoints::project_member_role(project_id, member_id),
            &RoleChange { role },
        )
        .await
}

/// Removes a member from a project. Owner only.
pub async fn remove_member(
    client: &ApiClient,
    project_id: &ProjectId,
    member_id: &str,
) -> Result<(), ApiError> {
    client
        .delete(&endpoints::project_member(project_id, member_id))
        .await
}
