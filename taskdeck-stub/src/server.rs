//! REST handlers and server bootstrap.
//!
//! Routes mirror the API surface the client consumes, mounted under
//! `/api`. Error responses carry a JSON `{"message"}` body so the
//! client's error taxonomy sees the same shapes as the real backend.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use taskdeck_api::comment::CommentId;
use taskdeck_api::form::TaskPayload;
use taskdeck_api::notification::NotificationId;
use taskdeck_api::project::{ProjectId, ProjectRole};
use taskdeck_api::reaction::Reaction;
use taskdeck_api::task::{Task, TaskId, TaskPriority, TaskStatus};
use taskdeck_api::user::{User, UserId};

use crate::state::{StubError, StubState};

type AppState = Arc<StubState>;

/// An error response: status code plus `{"message"}` body.
struct Failure(StatusCode, String);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.1 });
        (self.0, Json(body)).into_response()
    }
}

impl From<StubError> for Failure {
    fn from(error: StubError) -> Self {
        let status = match error {
            StubError::Unauthorized => StatusCode::UNAUTHORIZED,
            StubError::Forbidden(_) => StatusCode::FORBIDDEN,
            StubError::NotFound(_) => StatusCode::NOT_FOUND,
            StubError::Conflict(_) => StatusCode::CONFLICT,
        };
        Self(status, error.to_string())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn require_user(state: &StubState, headers: &HeaderMap) -> Result<User, Failure> {
    let token = bearer_token(headers).ok_or_else(|| Failure::from(StubError::Unauthorized))?;
    Ok(state.authenticate(token).await?)
}

// ---------------------------------------------------------------------------
// Request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct AuthBody {
    token: String,
    #[serde(flatten)]
    user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserStatisticsBody {
    total_projects: u64,
    total_tasks: u64,
    completed_tasks: u64,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
}

#[derive(Debug, Deserialize)]
struct ProjectBody {
    name: String,
    description: String,
    color: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMemberBody {
    user_id: UserId,
    role: ProjectRole,
}

#[derive(Debug, Deserialize)]
struct RoleBody {
    role: ProjectRole,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FilterBody {
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    project_id: Option<ProjectId>,
    assigned_to_id: Option<UserId>,
    search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskStatisticsBody {
    total: u64,
    todo: u64,
    in_progress: u64,
    in_review: u64,
    done: u64,
    cancelled: u64,
}

#[derive(Debug, Deserialize)]
struct CommentBody {
    text: String,
}

#[derive(Debug, Serialize)]
struct CountBody {
    count: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<AuthBody>, Failure> {
    let (token, user) = state
        .register(&body.email, &body.password, &body.first_name, &body.last_name)
        .await?;
    tracing::info!(user = %user.id, "registered");
    Ok(Json(AuthBody { token, user }))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthBody>, Failure> {
    let (token, user) = state.login(&body.email, &body.password).await?;
    Ok(Json(AuthBody { token, user }))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        state.logout(token).await;
    }
    StatusCode::NO_CONTENT
}

async fn profile(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<User>, Failure> {
    Ok(Json(require_user(&state, &headers).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProfileBody>,
) -> Result<Json<User>, Failure> {
    let user = require_user(&state, &headers).await?;
    let updated = state
        .update_profile(&user.id, &body.first_name, &body.last_name, &body.email)
        .await?;
    Ok(Json(updated))
}

async fn delete_account(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, Failure> {
    let user = require_user(&state, &headers).await?;
    state.delete_account(&user.id).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn user_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserStatisticsBody>, Failure> {
    let user = require_user(&state, &headers).await?;
    let projects = state.list_projects(&user.id).await;
    let tasks = state.list_tasks(&user.id).await;
    let mine: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.assigned_to_id.as_ref() == Some(&user.id))
        .collect();
    Ok(Json(UserStatisticsBody {
        total_projects: projects.len() as u64,
        total_tasks: mine.len() as u64,
        completed_tasks: mine
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count() as u64,
    }))
}

async fn search_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<User>>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.search_users(&params.q).await))
}

async fn all_users(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<User>>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.all_users().await))
}

async fn list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<taskdeck_api::project::Project>>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.list_projects(&user.id).await))
}

async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProjectBody>,
) -> Result<Json<taskdeck_api::project::Project>, Failure> {
    let user = require_user(&state, &headers).await?;
    let project = state
        .create_project(&user.id, &body.name, &body.description, &body.color)
        .await;
    Ok(Json(project))
}

async fn get_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<taskdeck_api::project::Project>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.get_project(&ProjectId::new(id)).await?))
}

async fn update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ProjectBody>,
) -> Result<Json<taskdeck_api::project::Project>, Failure> {
    let user = require_user(&state, &headers).await?;
    let project = state
        .update_project(
            &user.id,
            &ProjectId::new(id),
            &body.name,
            &body.description,
            &body.color,
        )
        .await?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    let user = require_user(&state, &headers).await?;
    state.delete_project(&user.id, &ProjectId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<taskdeck_api::project::ProjectMember>>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.list_members(&ProjectId::new(id)).await?))
}

async fn add_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<AddMemberBody>,
) -> Result<Json<taskdeck_api::project::ProjectMember>, Failure> {
    let user = require_user(&state, &headers).await?;
    let member = state
        .add_member(&user.id, &ProjectId::new(id), &body.user_id, body.role)
        .await?;
    Ok(Json(member))
}

async fn update_member_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, member_id)): Path<(String, String)>,
    Json(body): Json<RoleBody>,
) -> Result<Json<taskdeck_api::project::ProjectMember>, Failure> {
    let user = require_user(&state, &headers).await?;
    let member = state
        .update_member_role(&user.id, &ProjectId::new(id), &member_id, body.role)
        .await?;
    Ok(Json(member))
}

async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, Failure> {
    let user = require_user(&state, &headers).await?;
    state
        .remove_member(&user.id, &ProjectId::new(id), &member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn project_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Task>>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.project_tasks(&ProjectId::new(id)).await?))
}

async fn task_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<TaskStatisticsBody>, Failure> {
    require_user(&state, &headers).await?;
    let counts = state.task_statistics(&ProjectId::new(id)).await?;
    let by = |s: TaskStatus| counts.get(&s).copied().unwrap_or(0);
    Ok(Json(TaskStatisticsBody {
        total: counts.values().sum(),
        todo: by(TaskStatus::Todo),
        in_progress: by(TaskStatus::InProgress),
        in_review: by(TaskStatus::InReview),
        done: by(TaskStatus::Done),
        cancelled: by(TaskStatus::Cancelled),
    }))
}

async fn list_tasks(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<Task>>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.list_tasks(&user.id).await))
}

async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.create_task(&user.id, &payload).await?))
}

async fn filter_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<FilterBody>,
) -> Result<Json<Vec<Task>>, Failure> {
    let user = require_user(&state, &headers).await?;
    let needle = body.search.as_deref().map(str::to_lowercase);
    let tasks = state
        .list_tasks(&user.id)
        .await
        .into_iter()
        .filter(|t| body.status.is_none_or(|s| t.status == s))
        .filter(|t| body.priority.is_none_or(|p| t.priority == p))
        .filter(|t| body.project_id.as_ref().is_none_or(|p| t.project_id == *p))
        .filter(|t| {
            body.assigned_to_id
                .as_ref()
                .is_none_or(|a| t.assigned_to_id.as_ref() == Some(a))
        })
        .filter(|t| {
            needle.as_deref().is_none_or(|q| {
                t.title.to_lowercase().contains(q)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(q))
            })
        })
        .collect();
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Task>, Failure> {
    require_user(&state, &headers).await?;
    Ok(Json(state.get_task(&TaskId::new(id)).await?))
}

async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<Task>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(
        state.update_task(&user.id, &TaskId::new(id), &payload).await?,
    ))
}

async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    require_user(&state, &headers).await?;
    state.delete_task(&TaskId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<taskdeck_api::comment::Comment>>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.list_comments(&TaskId::new(id), &user.id).await?))
}

async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CommentBody>,
) -> Result<Json<taskdeck_api::comment::Comment>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(
        state.add_comment(&TaskId::new(id), &user.id, &body.text).await?,
    ))
}

async fn like_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<taskdeck_api::comment::Comment>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(
        state
            .react(&CommentId::new(id), &user.id, Reaction::Like)
            .await?,
    ))
}

async fn dislike_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<taskdeck_api::comment::Comment>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(
        state
            .react(&CommentId::new(id), &user.id, Reaction::Dislike)
            .await?,
    ))
}

async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<taskdeck_api::notification::Notification>>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.list_notifications(&user.id).await))
}

async fn unread_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<taskdeck_api::notification::Notification>>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(state.unread_notifications(&user.id).await))
}

async fn notification_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CountBody>, Failure> {
    let user = require_user(&state, &headers).await?;
    let count = state.unread_notifications(&user.id).await.len() as u64;
    Ok(Json(CountBody { count }))
}

async fn mark_notification_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<taskdeck_api::notification::Notification>, Failure> {
    let user = require_user(&state, &headers).await?;
    Ok(Json(
        state
            .mark_notification_read(&user.id, &NotificationId::new(id))
            .await?,
    ))
}

async fn mark_all_read(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, Failure> {
    let user = require_user(&state, &headers).await?;
    state.mark_all_notifications_read(&user.id).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Router and bootstrap
// ---------------------------------------------------------------------------

/// Builds the full router, with every route under `/api`.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/users/profile", get(profile).put(update_profile))
        .route("/users/account", axum::routing::delete(delete_account))
        .route("/users/statistics", get(user_statistics))
        .route("/users/search", get(search_users))
        .route("/users/all", get(all_users))
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/members", get(list_members).post(add_member))
        .route(
            "/projects/{id}/members/{member_id}",
            axum::routing::delete(remove_member),
        )
        .route(
            "/projects/{id}/members/{member_id}/role",
            put(update_member_role),
        )
        .route("/projects/{id}/tasks", get(project_tasks))
        .route("/projects/{id}/tasks/statistics", get(task_statistics))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/filter", post(filter_tasks))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/comments", get(list_comments).post(add_comment))
        .route("/comments/{id}/like", post(like_comment))
        .route("/comments/{id}/dislike", post(dislike_comment))
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread", get(unread_notifications))
        .route("/notifications/count", get(notification_count))
        .route("/notifications/read-all", put(mark_all_read))
        .route("/notifications/{id}/read", put(mark_notification_read));

    Router::new().nest("/api", api).with_state(state)
}

/// Starts the server on the given address with the given state.
///
/// Returns the bound address (useful with port 0) and the serve task's
/// join handle.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound.
pub async fn start_server_with_state(
    addr: &str,
    state: AppState,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "stub server failed");
        }
    });

    Ok((bound_addr, handle))
}

/// Starts a server on an ephemeral localhost port for tests.
///
/// # Panics
///
/// Panics if the ephemeral port cannot be bound; test-only convenience.
pub async fn start_test_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    match start_server_with_state("127.0.0.1:0", Arc::new(StubState::new())).await {
        Ok(bound) => bound,
        Err(e) => panic!("failed to start test server: {e}"),
    }
}
