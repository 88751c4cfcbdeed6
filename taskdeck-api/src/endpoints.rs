//! REST endpoint paths consumed by the service layer.
//!
//! Paths are relative to the configured API base URL.

use crate::comment::CommentId;
use crate::notification::NotificationId;
use crate::project::ProjectId;
use crate::task::TaskId;

/// `POST`: create an account.
pub const AUTH_REGISTER: &str = "/auth/register";
/// `POST`: exchange credentials for a bearer token.
pub const AUTH_LOGIN: &str = "/auth/login";
/// `POST`: invalidate the current token (best effort).
pub const AUTH_LOGOUT: &str = "/auth/logout";

/// `GET`/`PUT`: the authenticated user's profile.
pub const USERS_PROFILE: &str = "/users/profile";
/// `DELETE`: the authenticated user's account.
pub const USERS_ACCOUNT: &str = "/users/account";
/// `GET`: per-user task statistics.
pub const USERS_STATISTICS: &str = "/users/statistics";
/// `GET`: search users by the `q` query parameter.
pub const USERS_SEARCH: &str = "/users/search";
/// `GET`: list all users.
pub const USERS_ALL: &str = "/users/all";

/// `GET`/`POST`: project collection.
pub const PROJECTS: &str = "/projects";

/// `GET`/`POST`: task collection.
pub const TASKS: &str = "/tasks";
/// `POST`: filtered task query.
pub const TASKS_FILTER: &str = "/tasks/filter";

/// `GET`: all notifications.
pub const NOTIFICATIONS: &str = "/notifications";
/// `GET`: unread notifications.
pub const NOTIFICATIONS_UNREAD: &str = "/notifications/unread";
/// `GET`: unread notification count.
pub const NOTIFICATIONS_COUNT: &str = "/notifications/count";
/// `PUT`: mark every notification read.
pub const NOTIFICATIONS_READ_ALL: &str = "/notifications/read-all";

/// `GET`/`PUT`/`DELETE`: a single project.
#[must_use]
pub fn project(id: &ProjectId) -> String {
    format!("/projects/{id}")
}

/// `GET`/`POST`: a project's member collection.
#[must_use]
pub fn project_members(id: &ProjectId) -> String {
    format!("/projects/{id}/members")
}

/// `DELETE`: a single project membership.
#[must_use]
pub fn project_member(project_id: &ProjectId, member_id: &str) -> String {
    format!("/projects/{project_id}/members/{member_id}")
}

/// `PUT`: a membership's role.
#[must_use]
pub fn project_member_role(project_id: &ProjectId, member_id: &str) -> String {
    format!("/projects/{project_id}/members/{member_id}/role")
}

/// `GET`: tasks belonging to a project.
#[must_use]
pub fn project_tasks(id: &ProjectId) -> String {
    format!("/projects/{id}/tasks")
}

/// `GET`: per-project task statistics.
#[must_use]
pub fn project_task_statistics(id: &ProjectId) -> String {
    format!("/projects/{id}/tasks/statistics")
}

/// `GET`/`PUT`/`DELETE`: a single task.
#[must_use]
pub fn task(id: &TaskId) -> String {
    format!("/tasks/{id}")
}

/// `GET`/`POST`: a task's comment collection.
#[must_use]
pub fn task_comments(id: &TaskId) -> String {
    format!("/tasks/{id}/comments")
}

/// `POST`: like a comment.
#[must_use]
pub fn comment_like(id: &CommentId) -> String {
    format!("/comments/{id}/like")
}

/// `POST`: dislike a comment.
#[must_use]
pub fn comment_dislike(id: &CommentId) -> String {
    format!("/comments/{id}/dislike")
}

/// `PUT`: mark one notification read.
#[must_use]
pub fn notification_read(id: &NotificationId) -> String {
    format!("/notifications/{id}/read")
}
