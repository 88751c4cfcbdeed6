//! Task, comment, and statistics endpoints.

use serde::{Deserialize, Serialize};

use taskdeck_api::comment::{Comment, CommentId, NewComment};
use taskdeck_api::endpoints;
use taskdeck_api::form::TaskPayload;
use taskdeck_api::project::ProjectId;
use taskdeck_api::task::{Task, TaskId, TaskPriority, TaskStatus};
use taskdeck_api::user::UserId;

use super::{ApiClient, ApiError};

/// Payload for `POST /tasks/filter`. Absent criteria are omitted from
/// the request and do not constrain the result.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Restrict to one status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Restrict to one priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Restrict to one project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Restrict to one assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<UserId>,
    /// Title/description substring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Per-project task counts by status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskStatistics {
    /// All tasks in the project.
    pub total: u64,
    /// Tasks in `TODO`.
    pub todo: u64,
    /// Tasks in `IN_PROGRESS`.
    pub in_progress: u64,
    /// Tasks in `IN_REVIEW`.
    pub in_review: u64,
    /// Tasks in `DONE`.
    pub done: u64,
    /// Tasks in `CANCELLED`.
    pub cancelled: u64,
}

/// Lists every task visible to the authenticated user.
pub async fn list_all(client: &ApiClient) -> Result<Vec<Task>, ApiError> {
    client.get(endpoints::TASKS).await
}

/// Lists the tasks of one project.
pub async fn project_tasks(client: &ApiClient, project_id: &ProjectId) -> Result<Vec<Task>, ApiError> {
    client.get(&endpoints::project_tasks(project_id)).await
}

/// Fetches a single task.
pub async fn get(client: &ApiClient, id: &TaskId) -> Result<Task, ApiError> {
    client.get(&endpoints::task(id)).await
}

/// Creates a task.
pub async fn create(client: &ApiClient, payload: &TaskPayload) -> Result<Task, ApiError> {
    client.post(endpoints::TASKS, payload).await
}

/// Updates a task. The payload carries only the fields to change.
pub async fn update(client: &ApiClient, id: &TaskId, payload: &TaskPayload) -> Result<Task, ApiError> {
    client.put(&endpoints::task(id), payload).await
}

/// Deletes a task.
pub async fn delete(client: &ApiClient, id: &TaskId) -> Result<(), ApiError> {
    client.delete(&endpoints::task(id)).await
}

/// Queries tasks matching the filter.
pub async fn filter(client: &ApiClient, criteria: &TaskFilter) -> Result<Vec<Task>, ApiError> {
    client.post(endpoints::TASKS_FILTER, criteria).await
}

/// Fetches per-project task statistics.
pub async fn statistics(client: &ApiClient, project_id: &ProjectId) -> Result<TaskStatistics, ApiError> {
    client
        .get(&endpoints::project_task_statistics(project_id))
        .await
}

/// Lists a task's comments.
pub async fn comments(client: &ApiClient, task_id: &TaskId) -> Result<Vec<Comment>, ApiError> {
    client.get(&endpoints::task_comments(task_id)).await
}

/// Posts a comment on a task.
pub async fn add_comment(
    client: &ApiClient,
    task_id: &TaskId,
    comment: &NewComment,
) -> Result<Comment, ApiError> {
    client.post(&endpoints::task_comments(task_id), comment).await
}

/// Likes a comment, returning the updated comment.
pub async fn like_comment(client: &ApiClient, id: &CommentId) -> Result<Comment, ApiError> {
    client.post_unit(&endpoints::comment_like(id)).await
}

/// Dislikes a comment, returning the updated comment.
pub async fn dislike_comment(client: &ApiClient, id: &CommentId) -> Result<Comment, ApiError> {
    client.post_unit(&endpoints::comment_dislike(id)).await
}
