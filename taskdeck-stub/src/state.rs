//! In-memory tables backing the stub server.
//!
//! Thread-safe via [`RwLock`]. Each table maps ids to records; reaction
//! state is tracked per (comment, user) so the same comment serializes
//! differently for different requesters, matching the real API.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use taskdeck_api::comment::{Comment, CommentId};
use taskdeck_api::form::TaskPayload;
use taskdeck_api::notification::{Notification, NotificationId};
use taskdeck_api::project::{Project, ProjectId, ProjectMember, ProjectRole};
use taskdeck_api::reaction::{Reaction, ReactionCounts};
use taskdeck_api::task::{Task, TaskId, TaskStatus};
use taskdeck_api::user::{User, UserId};

/// Operation failures, mapped to HTTP statuses by the server layer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StubError {
    /// No or invalid bearer token (401).
    #[error("Invalid or missing credentials")]
    Unauthorized,
    /// The action is not permitted for this user (403).
    #[error("{0}")]
    Forbidden(String),
    /// The resource does not exist (404).
    #[error("{0}")]
    NotFound(String),
    /// The request conflicts with existing state (409).
    #[error("{0}")]
    Conflict(String),
}

/// A registered account. The password is held only for login checks and
/// never serialized.
#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// In-memory server state.
#[derive(Default)]
pub struct StubState {
    accounts: RwLock<HashMap<String, Account>>,
    /// Bearer token -> user id.
    tokens: RwLock<HashMap<String, String>>,
    projects: RwLock<HashMap<String, Project>>,
    /// Project id -> membership records.
    members: RwLock<HashMap<String, Vec<ProjectMember>>>,
    tasks: RwLock<HashMap<String, Task>>,
    /// Task id -> comments, in creation order.
    comments: RwLock<HashMap<String, Vec<Comment>>>,
    /// (comment id, user id) -> that user's reaction.
    reactions: RwLock<HashMap<(String, String), Reaction>>,
    /// User id -> notifications, newest last.
    notifications: RwLock<HashMap<String, Vec<Notification>>>,
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

impl StubState {
    /// Creates empty server state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- auth ----------------------------------------------------------

    /// Registers an account and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Conflict`] if the email is already taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<(String, User), StubError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.user.email == email) {
            return Err(StubError::Conflict("Email is already registered".to_string()));
        }

        let user = User {
            id: UserId::new(new_id()),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: None,
        };
        accounts.insert(
            user.id.to_string(),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        drop(accounts);

        let token = self.issue_token(&user.id).await;
        Ok((token, user))
    }

    /// Opens a session for existing credentials.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Unauthorized`] on a wrong email or password.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), StubError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .values()
            .find(|a| a.user.email == email && a.password == password)
            .cloned()
            .ok_or(StubError::Unauthorized)?;
        drop(accounts);

        let token = self.issue_token(&account.user.id).await;
        Ok((token, account.user))
    }

    /// Invalidates a token. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Unauthorized`] for unknown tokens.
    pub async fn authenticate(&self, token: &str) -> Result<User, StubError> {
        let tokens = self.tokens.read().await;
        let user_id = tokens.get(token).ok_or(StubError::Unauthorized)?.clone();
        drop(tokens);

        let accounts = self.accounts.read().await;
        accounts
            .get(&user_id)
            .map(|a| a.user.clone())
            .ok_or(StubError::Unauthorized)
    }

    async fn issue_token(&self, user_id: &UserId) -> String {
        let token = new_id();
        self.tokens
            .write()
            .await
            .insert(token.clone(), user_id.to_string());
        token
    }

    // -- users ---------------------------------------------------------

    /// Updates a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown users.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<User, StubError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&user_id.to_string())
            .ok_or_else(|| StubError::NotFound("User not found".to_string()))?;
        account.user.first_name = first_name.to_string();
        account.user.last_name = last_name.to_string();
        account.user.email = email.to_string();
        Ok(account.user.clone())
    }

    /// Deletes an account and every session it holds.
    pub async fn delete_account(&self, user_id: &UserId) {
        self.accounts.write().await.remove(&user_id.to_string());
        self.tokens
            .write()
            .await
            .retain(|_, uid| uid != &user_id.to_string());
    }

    /// Lists every registered user.
    pub async fn all_users(&self) -> Vec<User> {
        self.accounts
            .read()
            .await
            .values()
            .map(|a| a.user.clone())
            .collect()
    }

    /// Searches users by name or email substring, case-insensitively.
    pub async fn search_users(&self, query: &str) -> Vec<User> {
        let needle = query.to_lowercase();
        self.accounts
            .read()
            .await
            .values()
            .filter(|a| {
                a.user.email.to_lowercase().contains(&needle)
                    || a.user.full_name().to_lowercase().contains(&needle)
            })
            .map(|a| a.user.clone())
            .collect()
    }

    // -- projects ------------------------------------------------------

    /// Creates a project; the creator becomes its owner and first member.
    pub async fn create_project(
        &self,
        owner: &UserId,
        name: &str,
        description: &str,
        color: &str,
    ) -> Project {
        let project = Project {
            id: ProjectId::new(new_id()),
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            owner_id: owner.clone(),
            created_at: Some(now_timestamp()),
        };
        self.projects
            .write()
            .await
            .insert(project.id.to_string(), project.clone());

        let owner_member = ProjectMember {
            id: new_id(),
            user_id: owner.clone(),
            role: ProjectRole::Owner,
            user: self.user_record(owner).await,
        };
        self.members
            .write()
            .await
            .insert(project.id.to_string(), vec![owner_member]);
        project
    }

    /// Lists projects the user owns or belongs to.
    pub async fn list_projects(&self, user_id: &UserId) -> Vec<Project> {
        let members = self.members.read().await;
        self.projects
            .read()
            .await
            .values()
            .filter(|p| {
                p.owner_id == *user_id
                    || members
                        .get(&p.id.to_string())
                        .is_some_and(|ms| ms.iter().any(|m| m.user_id == *user_id))
            })
            .cloned()
            .collect()
    }

    /// Fetches a project.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown ids.
    pub async fn get_project(&self, id: &ProjectId) -> Result<Project, StubError> {
        self.projects
            .read()
            .await
            .get(&id.to_string())
            .cloned()
            .ok_or_else(|| StubError::NotFound("Project not found".to_string()))
    }

    /// Updates a project's metadata. Owner or elevated member only.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] or [`StubError::Forbidden`].
    pub async fn update_project(
        &self,
        actor: &UserId,
        id: &ProjectId,
        name: &str,
        description: &str,
        color: &str,
    ) -> Result<Project, StubError> {
        self.require_elevated(actor, id).await?;
        let mut projects = self.projects.write().await;
        let project = projects
            .get_mut(&id.to_string())
            .ok_or_else(|| StubError::NotFound("Project not found".to_string()))?;
        project.name = name.to_string();
        project.description = description.to_string();
        project.color = color.to_string();
        Ok(project.clone())
    }

    /// Deletes a project and its tasks. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] or [`StubError::Forbidden`].
    pub async fn delete_project(&self, actor: &UserId, id: &ProjectId) -> Result<(), StubError> {
        let project = self.get_project(id).await?;
        if project.owner_id != *actor {
            return Err(StubError::Forbidden(
                "Only the project owner may delete it".to_string(),
            ));
        }
        self.projects.write().await.remove(&id.to_string());
        self.members.write().await.remove(&id.to_string());
        self.tasks
            .write()
            .await
            .retain(|_, t| t.project_id != *id);
        Ok(())
    }

    /// Lists a project's members.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown projects.
    pub async fn list_members(&self, id: &ProjectId) -> Result<Vec<ProjectMember>, StubError> {
        self.get_project(id).await?;
        Ok(self
            .members
            .read()
            .await
            .get(&id.to_string())
            .cloned()
            .unwrap_or_default())
    }

    /// Adds a member to a project.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::Conflict`] when the user is already a member,
    /// [`StubError::Forbidden`] when the actor lacks an elevated role.
    pub async fn add_member(
        &self,
        actor: &UserId,
        id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<ProjectMember, StubError> {
        self.require_elevated(actor, id).await?;
        let mut members = self.members.write().await;
        let list = members.entry(id.to_string()).or_default();
        if list.iter().any(|m| m.user_id == *user_id) {
            return Err(StubError::Conflict(
                "User is already a member of this project".to_string(),
            ));
        }
        let member = ProjectMember {
            id: new_id(),
            user_id: user_id.clone(),
            role,
            user: self.user_record(user_id).await,
        };
        list.push(member.clone());
        Ok(member)
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] or [`StubError::Forbidden`].
    pub async fn update_member_role(
        &self,
        actor: &UserId,
        id: &ProjectId,
        member_id: &str,
        role: ProjectRole,
    ) -> Result<ProjectMember, StubError> {
        self.require_elevated(actor, id).await?;
        let mut members = self.members.write().await;
        let list = members
            .get_mut(&id.to_string())
            .ok_or_else(|| StubError::NotFound("Project not found".to_string()))?;
        let member = list
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| StubError::NotFound("Member not found".to_string()))?;
        member.role = role;
        Ok(member.clone())
    }

    /// Removes a member. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] or [`StubError::Forbidden`].
    pub async fn remove_member(
        &self,
        actor: &UserId,
        id: &ProjectId,
        member_id: &str,
    ) -> Result<(), StubError> {
        let project = self.get_project(id).await?;
        if project.owner_id != *actor {
            return Err(StubError::Forbidden(
                "Only the project owner may remove members".to_string(),
            ));
        }
        let mut members = self.members.write().await;
        let list = members
            .get_mut(&id.to_string())
            .ok_or_else(|| StubError::NotFound("Project not found".to_string()))?;
        let before = list.len();
        list.retain(|m| m.id != member_id);
        if list.len() == before {
            return Err(StubError::NotFound("Member not found".to_string()));
        }
        Ok(())
    }

    async fn require_elevated(&self, actor: &UserId, id: &ProjectId) -> Result<(), StubError> {
        let project = self.get_project(id).await?;
        if project.owner_id == *actor {
            return Ok(());
        }
        let members = self.members.read().await;
        let elevated = members
            .get(&id.to_string())
            .is_some_and(|ms| ms.iter().any(|m| m.user_id == *actor && m.role.is_elevated()));
        if elevated {
            Ok(())
        } else {
            Err(StubError::Forbidden(
                "You do not have permission to modify this project".to_string(),
            ))
        }
    }

    async fn user_record(&self, user_id: &UserId) -> Option<User> {
        self.accounts
            .read()
            .await
            .get(&user_id.to_string())
            .map(|a| a.user.clone())
    }

    // -- tasks ---------------------------------------------------------

    /// Creates a task from a payload. Assigning it to someone else
    /// produces a notification for the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] when the payload's project does
    /// not exist or required fields are missing.
    pub async fn create_task(&self, actor: &UserId, payload: &TaskPayload) -> Result<Task, StubError> {
        let project_id = payload
            .project_id
            .clone()
            .ok_or_else(|| StubError::NotFound("Project is required".to_string()))?;
        self.get_project(&project_id).await?;

        let task = Task {
            id: TaskId::new(new_id()),
            title: payload.title.clone().unwrap_or_default(),
            description: payload.description.clone(),
            status: payload.status.unwrap_or(TaskStatus::Todo),
            priority: payload
                .priority
                .unwrap_or(taskdeck_api::task::TaskPriority::Medium),
            project_id,
            assigned_to_id: payload.assigned_to_id.clone(),
            due_date: payload.due_date.clone(),
            estimated_hours: payload.estimated_hours,
            actual_hours: payload.actual_hours,
            position: payload.position,
            created_at: Some(now_timestamp()),
            updated_at: Some(now_timestamp()),
        };
        self.tasks
            .write()
            .await
            .insert(task.id.to_string(), task.clone());

        if let Some(assignee) = &task.assigned_to_id {
            if assignee != actor {
                self.push_notification(
                    assignee,
                    "Task assigned",
                    &format!("You have been assigned '{}'", task.title),
                    Some(task.id.clone()),
                )
                .await;
            }
        }
        Ok(task)
    }

    /// Lists every task in projects visible to the user.
    pub async fn list_tasks(&self, user_id: &UserId) -> Vec<Task> {
        let visible: Vec<String> = self
            .list_projects(user_id)
            .await
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        self.tasks
            .read()
            .await
            .values()
            .filter(|t| visible.contains(&t.project_id.to_string()))
            .cloned()
            .collect()
    }

    /// Lists one project's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown projects.
    pub async fn project_tasks(&self, id: &ProjectId) -> Result<Vec<Task>, StubError> {
        self.get_project(id).await?;
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.project_id == *id)
            .cloned()
            .collect())
    }

    /// Fetches a task.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown ids.
    pub async fn get_task(&self, id: &TaskId) -> Result<Task, StubError> {
        self.tasks
            .read()
            .await
            .get(&id.to_string())
            .cloned()
            .ok_or_else(|| StubError::NotFound("Task not found".to_string()))
    }

    /// Applies the fields present in the payload to a task. Newly
    /// assigning the task notifies the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown ids.
    pub async fn update_task(
        &self,
        actor: &UserId,
        id: &TaskId,
        payload: &TaskPayload,
    ) -> Result<Task, StubError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id.to_string())
            .ok_or_else(|| StubError::NotFound("Task not found".to_string()))?;

        let previous_assignee = task.assigned_to_id.clone();
        if let Some(title) = &payload.title {
            task.title = title.clone();
        }
        if let Some(description) = &payload.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = payload.status {
            task.status = status;
        }
        if let Some(priority) = payload.priority {
            task.priority = priority;
        }
        if let Some(assignee) = &payload.assigned_to_id {
            task.assigned_to_id = Some(assignee.clone());
        }
        if let Some(due_date) = &payload.due_date {
            task.due_date = Some(due_date.clone());
        }
        if let Some(estimated) = payload.estimated_hours {
            task.estimated_hours = Some(estimated);
        }
        if let Some(actual) = payload.actual_hours {
            task.actual_hours = Some(actual);
        }
        if let Some(position) = payload.position {
            task.position = Some(position);
        }
        task.updated_at = Some(now_timestamp());
        let updated = task.clone();
        drop(tasks);

        if let Some(assignee) = &updated.assigned_to_id {
            if previous_assignee.as_ref() != Some(assignee) && assignee != actor {
                self.push_notification(
                    assignee,
                    "Task assigned",
                    &format!("You have been assigned '{}'", updated.title),
                    Some(updated.id.clone()),
                )
                .await;
            }
        }
        Ok(updated)
    }

    /// Deletes a task and its comments.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown ids.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), StubError> {
        self.tasks
            .write()
            .await
            .remove(&id.to_string())
            .ok_or_else(|| StubError::NotFound("Task not found".to_string()))?;
        self.comments.write().await.remove(&id.to_string());
        Ok(())
    }

    /// Per-project task counts by status, as `(total, per-status)`.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown projects.
    pub async fn task_statistics(&self, id: &ProjectId) -> Result<HashMap<TaskStatus, u64>, StubError> {
        let tasks = self.project_tasks(id).await?;
        let mut counts: HashMap<TaskStatus, u64> = HashMap::new();
        for task in tasks {
            *counts.entry(task.status).or_default() += 1;
        }
        Ok(counts)
    }

    // -- comments ------------------------------------------------------

    /// Lists a task's comments with the requester's reaction filled in.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown tasks.
    pub async fn list_comments(&self, task_id: &TaskId, viewer: &UserId) -> Result<Vec<Comment>, StubError> {
        self.get_task(task_id).await?;
        let comments = self
            .comments
            .read()
            .await
            .get(&task_id.to_string())
            .cloned()
            .unwrap_or_default();
        let reactions = self.reactions.read().await;
        Ok(comments
            .into_iter()
            .map(|mut c| {
                c.user_reaction = reactions
                    .get(&(c.id.to_string(), viewer.to_string()))
                    .copied();
                c
            })
            .collect())
    }

    /// Posts a comment on a task.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown tasks.
    pub async fn add_comment(
        &self,
        task_id: &TaskId,
        author: &UserId,
        text: &str,
    ) -> Result<Comment, StubError> {
        self.get_task(task_id).await?;
        let comment = Comment {
            id: CommentId::new(new_id()),
            task_id: task_id.clone(),
            author_id: author.clone(),
            author: self.user_record(author).await,
            text: text.to_string(),
            created_at: now_timestamp(),
            likes_count: 0,
            dislikes_count: 0,
            user_reaction: None,
        };
        self.comments
            .write()
            .await
            .entry(task_id.to_string())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    /// Applies a reaction to a comment, returning the updated record as
    /// seen by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown comments.
    pub async fn react(
        &self,
        comment_id: &CommentId,
        actor: &UserId,
        reaction: Reaction,
    ) -> Result<Comment, StubError> {
        let mut reactions = self.reactions.write().await;
        let key = (comment_id.to_string(), actor.to_string());
        let current = reactions.get(&key).copied();

        let mut comments = self.comments.write().await;
        let comment = comments
            .values_mut()
            .flat_map(|list| list.iter_mut())
            .find(|c| c.id == *comment_id)
            .ok_or_else(|| StubError::NotFound("Comment not found".to_string()))?;

        let mut counts = ReactionCounts {
            likes: comment.likes_count,
            dislikes: comment.dislikes_count,
            user_reaction: current,
        };
        counts.react(reaction);
        comment.likes_count = counts.likes;
        comment.dislikes_count = counts.dislikes;
        reactions.insert(key, reaction);

        let mut updated = comment.clone();
        updated.user_reaction = counts.user_reaction;
        Ok(updated)
    }

    // -- notifications -------------------------------------------------

    async fn push_notification(
        &self,
        user_id: &UserId,
        title: &str,
        message: &str,
        task_id: Option<TaskId>,
    ) {
        let notification = Notification {
            id: NotificationId::new(new_id()),
            title: title.to_string(),
            message: message.to_string(),
            is_read: false,
            task_id,
            created_at: now_timestamp(),
        };
        self.notifications
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(notification);
    }

    /// Lists a user's notifications.
    pub async fn list_notifications(&self, user_id: &UserId) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .get(&user_id.to_string())
            .cloned()
            .unwrap_or_default()
    }

    /// Lists a user's unread notifications.
    pub async fn unread_notifications(&self, user_id: &UserId) -> Vec<Notification> {
        self.list_notifications(user_id)
            .await
            .into_iter()
            .filter(|n| !n.is_read)
            .collect()
    }

    /// Marks one notification read. Already-read notifications stay read.
    ///
    /// # Errors
    ///
    /// Returns [`StubError::NotFound`] for unknown ids.
    pub async fn mark_notification_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<Notification, StubError> {
        let mut notifications = self.notifications.write().await;
        let list = notifications
            .get_mut(&user_id.to_string())
            .ok_or_else(|| StubError::NotFound("Notification not found".to_string()))?;
        let notification = list
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or_else(|| StubError::NotFound("Notification not found".to_string()))?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    /// Marks every notification of a user read.
    pub async fn mark_all_notifications_read(&self, user_id: &UserId) {
        if let Some(list) = self.notifications.write().await.get_mut(&user_id.to_string()) {
            for notification in list.iter_mut() {
                notification.is_read = true;
            }
        }
    }
}
