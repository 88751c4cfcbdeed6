//! Networking coordinator for wiring the TUI to the async HTTP layer.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the async [`ApiClient`] service stack. It spawns a
//! background tokio task and communicates with the main thread via
//! [`ApiCommand`] / [`ApiEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── ApiEvent ───  tokio background task
//!                     ─── ApiCommand →
//! ```
//!
//! The main thread sends [`ApiCommand`]s (e.g., move a task) and drains
//! [`ApiEvent`]s (e.g., tasks loaded, error) on each tick of the
//! poll-based event loop. Commands are handled one at a time; the UI
//! keeps rendering last-known-good state until a response lands.
//!
//! A 401 from any authenticated call clears the stored credentials and
//! emits [`ApiEvent::Unauthorized`], which sends the UI back to the
//! login screen.

use tokio::sync::mpsc;

use taskdeck_api::comment::{Comment, CommentId, NewComment};
use taskdeck_api::form::TaskPayload;
use taskdeck_api::notification::{Notification, NotificationId};
use taskdeck_api::project::{Project, ProjectId, ProjectMember};
use taskdeck_api::task::{Task, TaskId, TaskStatus};
use taskdeck_api::user::User;

use crate::api::auth::{LoginRequest, RegisterRequest};
use crate::api::{ApiClient, ApiError, auth, notifications, projects, tasks, users};
use crate::session::SessionStore;

/// Commands sent from the TUI main loop to the networking background task.
#[derive(Debug)]
pub enum ApiCommand {
    /// Create an account and start a session.
    Register(RegisterRequest),
    /// Exchange credentials for a session.
    Login(LoginRequest),
    /// End the session; local credentials are cleared regardless of the
    /// server call's outcome.
    Logout,
    /// Fetch every task, or one project's tasks.
    FetchTasks {
        /// Restrict to one project when set.
        project_id: Option<ProjectId>,
    },
    /// Create a task from a normalized payload.
    CreateTask(TaskPayload),
    /// Update a task with the fields present in the payload.
    UpdateTask {
        /// Task to update.
        id: TaskId,
        /// Fields to change.
        payload: TaskPayload,
    },
    /// Move a task to another board column. Carries only the new status.
    MoveTask {
        /// Task to move.
        id: TaskId,
        /// Column to move it to.
        status: TaskStatus,
    },
    /// Delete a task.
    DeleteTask(TaskId),
    /// Fetch the project list.
    FetchProjects,
    /// Fetch a project, its tasks, and its members together.
    FetchProjectDetail(ProjectId),
    /// Fetch the notification list.
    FetchNotifications,
    /// Mark one notification read.
    MarkNotificationRead(NotificationId),
    /// Mark every notification read.
    MarkAllNotificationsRead,
    /// Fetch a task's comments.
    FetchComments(TaskId),
    /// Post a comment on a task.
    AddComment {
        /// Task to comment on.
        task_id: TaskId,
        /// Comment body.
        text: String,
    },
    /// Like a comment.
    LikeComment(CommentId),
    /// Dislike a comment.
    DislikeComment(CommentId),
    /// Gracefully shut down the networking task.
    Shutdown,
}

/// Events sent from the networking background task to the TUI main loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// A stored session was restored and the profile fetched.
    SessionRestored(User),
    /// No usable stored session; show the login screen.
    SessionMissing,
    /// Login or registration completed.
    LoggedIn(User),
    /// The session ended.
    LoggedOut,
    /// Fresh authoritative task list.
    TasksLoaded(Vec<Task>),
    /// A task was created.
    TaskCreated(Task),
    /// A task was updated.
    TaskUpdated(Task),
    /// A task was moved to another column.
    TaskMoved(Task),
    /// A task was deleted.
    TaskDeleted(TaskId),
    /// Fresh authoritative project list.
    ProjectsLoaded(Vec<Project>),
    /// A project detail view loaded completely.
    ProjectDetailLoaded {
        /// The project.
        project: Project,
        /// Its tasks.
        tasks: Vec<Task>,
        /// Its members.
        members: Vec<ProjectMember>,
    },
    /// A project detail view could not be loaded completely; the caller
    /// should return to the project list.
    ProjectDetailUnavailable(String),
    /// Fresh authoritative notification list.
    NotificationsLoaded(Vec<Notification>),
    /// One notification was marked read.
    NotificationRead(Notification),
    /// Every notification was marked read.
    AllNotificationsRead,
    /// Fresh comment list for a task.
    CommentsLoaded {
        /// Task the comments belong to.
        task_id: TaskId,
        /// The comments.
        comments: Vec<Comment>,
    },
    /// A comment was posted.
    CommentAdded(Comment),
    /// A comment's reaction state changed; replaces the stored record.
    CommentUpdated(Comment),
    /// The server rejected the credentials; stored session was cleared.
    Unauthorized,
    /// Any other failure, as a user-facing message.
    Error(String),
}

/// Spawn the networking background task and return channel handles.
///
/// On startup the task attempts a session restore: a stored token is
/// installed and the profile fetched. Restore failure clears the stored
/// credentials only on 401; connectivity errors keep them for a later
/// attempt.
#[must_use]
pub fn spawn_net(
    client: ApiClient,
    session: SessionStore,
    channel_capacity: usize,
) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ApiCommand>(channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>(channel_capacity);

    tokio::spawn(async move {
        restore_session(&client, &session, &evt_tx).await;

        while let Some(command) = cmd_rx.recv().await {
            if matches!(command, ApiCommand::Shutdown) {
                tracing::info!("networking task shutting down");
                break;
            }
            handle_command(&client, &session, &evt_tx, command).await;
        }
    });

    (cmd_tx, evt_rx)
}

/// Attempts to restore a stored session.
async fn restore_session(client: &ApiClient, session: &SessionStore, evt_tx: &mpsc::Sender<ApiEvent>) {
    let Some(token) = session.token() else {
        let _ = evt_tx.send(ApiEvent::SessionMissing).await;
        return;
    };

    client.set_token(&token);
    match users::profile(client).await {
        Ok(user) => {
            // Refresh the snapshot; the profile is the authoritative copy.
            if let Err(e) = session.store(&token, &user) {
                tracing::warn!(error = %e, "failed to refresh session snapshot");
            }
            tracing::info!(user = %user.id, "session restored");
            let _ = evt_tx.send(ApiEvent::SessionRestored(user)).await;
        }
        Err(ApiError::Unauthorized) => {
            // Stale token: clear it and fall back to the login screen.
            session.clear();
            client.clear_token();
            let _ = evt_tx.send(ApiEvent::SessionMissing).await;
        }
        Err(e) => {
            // Keep the token; the server may just be unreachable.
            tracing::warn!(error = %e, "session restore failed");
            let _ = evt_tx.send(ApiEvent::Error(e.user_message())).await;
            let _ = evt_tx.send(ApiEvent::SessionMissing).await;
        }
    }
}

/// Handles one command, emitting the matching event or an error.
#[allow(clippy::too_many_lines)]
async fn handle_command(
    client: &ApiClient,
    session: &SessionStore,
    evt_tx: &mpsc::Sender<ApiEvent>,
    command: ApiCommand,
) {
    match command {
        ApiCommand::Register(request) => {
            match auth::register(client, &request).await {
                Ok(response) => complete_sign_in(client, session, evt_tx, response.token).await,
                // Sign-in failures stay on the login screen with a notice.
                Err(e) => {
                    let _ = evt_tx.send(ApiEvent::Error(e.user_message())).await;
                }
            }
        }
        ApiCommand::Login(request) => match auth::login(client, &request).await {
            Ok(response) => complete_sign_in(client, session, evt_tx, response.token).await,
            Err(ApiError::Unauthorized) => {
                let _ = evt_tx
                    .send(ApiEvent::Error("Invalid email or password".to_string()))
                    .await;
            }
            Err(e) => {
                let _ = evt_tx.send(ApiEvent::Error(e.user_message())).await;
            }
        },
        ApiCommand::Logout => {
            auth::logout(client).await;
            session.clear();
            client.clear_token();
            let _ = evt_tx.send(ApiEvent::LoggedOut).await;
        }
        ApiCommand::FetchTasks { project_id } => {
            let result = match project_id {
                Some(ref id) => tasks::project_tasks(client, id).await,
                None => tasks::list_all(client).await,
            };
            match result {
                Ok(list) => {
                    let _ = evt_tx.send(ApiEvent::TasksLoaded(list)).await;
                }
                Err(e) => fail(client, session, evt_tx, e).await,
            }
        }
        ApiCommand::CreateTask(payload) => match tasks::create(client, &payload).await {
            Ok(task) => {
                let _ = evt_tx.send(ApiEvent::TaskCreated(task)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::UpdateTask { id, payload } => match tasks::update(client, &id, &payload).await {
            Ok(task) => {
                let _ = evt_tx.send(ApiEvent::TaskUpdated(task)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::MoveTask { id, status } => {
            match tasks::update(client, &id, &TaskPayload::with_status(status)).await {
                Ok(task) => {
                    let _ = evt_tx.send(ApiEvent::TaskMoved(task)).await;
                }
                Err(e) => fail(client, session, evt_tx, e).await,
            }
        }
        ApiCommand::DeleteTask(id) => match tasks::delete(client, &id).await {
            Ok(()) => {
                let _ = evt_tx.send(ApiEvent::TaskDeleted(id)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::FetchProjects => match projects::list(client).await {
            Ok(list) => {
                let _ = evt_tx.send(ApiEvent::ProjectsLoaded(list)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::FetchProjectDetail(id) => {
            // All three must load, or the detail view is unavailable.
            let result = tokio::try_join!(
                projects::get(client, &id),
                tasks::project_tasks(client, &id),
                projects::members(client, &id),
            );
            match result {
                Ok((project, project_task_list, members)) => {
                    let _ = evt_tx
                        .send(ApiEvent::ProjectDetailLoaded {
                            project,
                            tasks: project_task_list,
                            members,
                        })
                        .await;
                }
                Err(ApiError::Unauthorized) => fail(client, session, evt_tx, ApiError::Unauthorized).await,
                Err(e) => {
                    let _ = evt_tx
                        .send(ApiEvent::ProjectDetailUnavailable(e.user_message()))
                        .await;
                }
            }
        }
        ApiCommand::FetchNotifications => match notifications::list(client).await {
            Ok(list) => {
                let _ = evt_tx.send(ApiEvent::NotificationsLoaded(list)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::MarkNotificationRead(id) => match notifications::mark_read(client, &id).await {
            Ok(notification) => {
                let _ = evt_tx.send(ApiEvent::NotificationRead(notification)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::MarkAllNotificationsRead => match notifications::mark_all_read(client).await {
            Ok(()) => {
                let _ = evt_tx.send(ApiEvent::AllNotificationsRead).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::FetchComments(task_id) => match tasks::comments(client, &task_id).await {
            Ok(comments) => {
                let _ = evt_tx
                    .send(ApiEvent::CommentsLoaded { task_id, comments })
                    .await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::AddComment { task_id, text } => {
            match tasks::add_comment(client, &task_id, &NewComment { text }).await {
                Ok(comment) => {
                    let _ = evt_tx.send(ApiEvent::CommentAdded(comment)).await;
                }
                Err(e) => fail(client, session, evt_tx, e).await,
            }
        }
        ApiCommand::LikeComment(id) => match tasks::like_comment(client, &id).await {
            Ok(comment) => {
                let _ = evt_tx.send(ApiEvent::CommentUpdated(comment)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::DislikeComment(id) => match tasks::dislike_comment(client, &id).await {
            Ok(comment) => {
                let _ = evt_tx.send(ApiEvent::CommentUpdated(comment)).await;
            }
            Err(e) => fail(client, session, evt_tx, e).await,
        },
        ApiCommand::Shutdown => {}
    }
}

/// Installs a fresh token, fetches the profile, and persists the session.
async fn complete_sign_in(
    client: &ApiClient,
    session: &SessionStore,
    evt_tx: &mpsc::Sender<ApiEvent>,
    token: String,
) {
    client.set_token(&token);
    match users::profile(client).await {
        Ok(user) => {
            if let Err(e) = session.store(&token, &user) {
                tracing::warn!(error = %e, "failed to persist session");
            }
            let _ = evt_tx.send(ApiEvent::LoggedIn(user)).await;
        }
        Err(e) => {
            client.clear_token();
            let _ = evt_tx.send(ApiEvent::Error(e.user_message())).await;
        }
    }
}

/// Maps a failed authenticated call onto events: a 401 clears the stored
/// session and forces the login screen, anything else becomes a notice.
async fn fail(
    client: &ApiClient,
    session: &SessionStore,
    evt_tx: &mpsc::Sender<ApiEvent>,
    error: ApiError,
) {
    if matches!(error, ApiError::Unauthorized) {
        session.clear();
        client.clear_token();
        let _ = evt_tx.send(ApiEvent::Unauthorized).await;
    } else {
        tracing::warn!(error = %error, "api call failed");
        let _ = evt_tx.send(ApiEvent::Error(error.user_message())).await;
    }
}
