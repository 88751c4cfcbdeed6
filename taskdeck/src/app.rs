//! Application state and event handling.
//!
//! [`App`] is the explicitly constructed context object the view layer
//! renders from; there are no ambient singletons. Key handling returns
//! the [`ApiCommand`] a gesture maps to (if any), and
//! [`App::apply_event`] folds server responses back into the mirrored
//! stores. The UI always renders last-known-good state: a board move is
//! only reflected once the server's updated task arrives.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_api::board::{self, DropEvent};
use taskdeck_api::form::TaskForm;
use taskdeck_api::task::{TaskId, TaskStatus};
use taskdeck_api::user::User;
use taskdeck_api::validate;

use crate::api::auth::LoginRequest;
use crate::net::{ApiCommand, ApiEvent};
use crate::store::{CommentStore, NotificationStore, ProjectStore, TaskStore};

/// Which screen is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Credential entry.
    Login,
    /// The Kanban board.
    Board,
    /// One task's detail view with its comments.
    TaskDetail(TaskId),
    /// The notification list.
    Notifications,
}

/// Which login form field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Email input.
    Email,
    /// Password input.
    Password,
}

/// Which panel of the board screen is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// The board columns.
    Board,
    /// The project sidebar.
    Sidebar,
}

/// Kind of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// A completed action.
    Success,
    /// A failed action.
    Error,
}

/// A transient notice shown in the status bar.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Notice text.
    pub message: String,
    /// Success or error styling.
    pub kind: ToastKind,
    /// Event-loop ticks until the notice disappears.
    ticks_left: u32,
}

/// Login form state.
#[derive(Debug)]
pub struct LoginForm {
    /// Email input value.
    pub email: String,
    /// Password input value.
    pub password: String,
    /// Which field is being edited.
    pub focus: Option<LoginField>,
    /// Inline validation errors from the last submit attempt.
    pub errors: validate::FieldErrors,
}

impl LoginForm {
    fn field_mut(&mut self) -> &mut String {
        match self.focus.unwrap_or(LoginField::Email) {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: Some(LoginField::Email),
            errors: validate::FieldErrors::default(),
        }
    }
}

/// Main application state.
pub struct App {
    /// Current screen.
    pub screen: Screen,
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// Login form state.
    pub login: LoginForm,

    /// Mirrored task list.
    pub tasks: TaskStore,
    /// Mirrored project list and detail members.
    pub projects: ProjectStore,
    /// Mirrored notification list.
    pub notifications: NotificationStore,
    /// Mirrored comments of the open task.
    pub comments: CommentStore,

    /// Project the board is scoped to; `None` shows every task.
    pub scope: Option<taskdeck_api::project::ProjectId>,
    /// Which board panel is focused.
    pub focus: PanelFocus,
    /// Selected board column index.
    pub selected_column: usize,
    /// Selected row within the selected column.
    pub selected_row: usize,
    /// Selected sidebar project index.
    pub selected_project: usize,
    /// Selected notification index.
    pub selected_notification: usize,
    /// Selected comment index on the task detail screen.
    pub selected_comment: usize,
    /// Comment compose input; `Some` while editing.
    pub comment_input: Option<String>,
    /// Quick-add task title input; `Some` while editing.
    pub task_input: Option<String>,

    /// Transient notice.
    pub toast: Option<Toast>,
    /// Whether the initial task fetch is still outstanding.
    pub loading: bool,
    /// Whether the app should quit.
    pub should_quit: bool,

    // In-flight flags: the triggering gesture is disabled for the
    // duration of its own call, which is the only duplicate-submit
    // protection there is.
    pending_move: bool,
    pending_submit: bool,

    toast_ticks: u32,
}

impl App {
    /// Creates the application state, starting on the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            user: None,
            login: LoginForm::default(),
            tasks: TaskStore::new(),
            projects: ProjectStore::new(),
            notifications: NotificationStore::new(),
            comments: CommentStore::new(),
            scope: None,
            focus: PanelFocus::Board,
            selected_column: 0,
            selected_row: 0,
            selected_project: 0,
            selected_notification: 0,
            selected_comment: 0,
            comment_input: None,
            task_input: None,
            toast: None,
            loading: false,
            should_quit: false,
            pending_move: false,
            pending_submit: false,
            toast_ticks: 60,
        }
    }

    /// Sets how many event-loop ticks a toast stays visible.
    #[must_use]
    pub const fn with_toast_ticks(mut self, ticks: u32) -> Self {
        self.toast_ticks = ticks;
        self
    }

    /// Shows a transient notice.
    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            ticks_left: self.toast_ticks,
        });
    }

    /// Advances the toast timer one tick; called every loop iteration.
    pub fn tick_toast(&mut self) {
        if let Some(toast) = &mut self.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
        }
    }

    /// The tasks of the currently selected board column, in column order.
    #[must_use]
    pub fn selected_column_status(&self) -> TaskStatus {
        board::BOARD_COLUMNS
            .get(self.selected_column)
            .copied()
            .unwrap_or(TaskStatus::Todo)
    }

    /// The task currently selected on the board, if any.
    #[must_use]
    pub fn selected_task_id(&self) -> Option<TaskId> {
        let column = board::column_tasks(self.tasks.all(), self.selected_column_status());
        column.get(self.selected_row).map(|t| t.id.clone())
    }

    /// Handle a key event, returning the command it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        // Ctrl+C quits from anywhere.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.screen.clone() {
            Screen::Login => self.handle_login_key(key),
            Screen::Board => self.handle_board_key(key),
            Screen::TaskDetail(task_id) => self.handle_detail_key(key, &task_id),
            Screen::Notifications => self.handle_notifications_key(key),
        }
    }

    /// Handle key event on the login screen.
    fn handle_login_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.login.focus = Some(match self.login.focus {
                    Some(LoginField::Email) => LoginField::Password,
                    _ => LoginField::Email,
                });
                None
            }
            KeyCode::Char(c) => {
                self.login.field_mut().push(c);
                None
            }
            KeyCode::Backspace => {
                self.login.field_mut().pop();
                None
            }
            KeyCode::Enter => self.submit_login(),
            _ => None,
        }
    }

    /// Validates the login form and issues the login command.
    ///
    /// Validation errors are rendered inline and no call is made; a
    /// submit while one is already in flight is ignored.
    fn submit_login(&mut self) -> Option<ApiCommand> {
        if self.pending_submit {
            return None;
        }
        let errors = validate::validate_login_form(&self.login.email, &self.login.password);
        if !errors.is_valid() {
            self.login.errors = errors;
            return None;
        }
        self.login.errors = validate::FieldErrors::default();
        self.pending_submit = true;
        Some(ApiCommand::Login(LoginRequest {
            email: self.login.email.clone(),
            password: self.login.password.clone(),
        }))
    }

    /// Handle key event on the board screen.
    #[allow(clippy::too_many_lines)]
    fn handle_board_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        // Quick-add mode captures every key until Enter or Esc.
        if self.task_input.is_some() {
            return self.handle_task_input_key(key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    PanelFocus::Board => PanelFocus::Sidebar,
                    PanelFocus::Sidebar => PanelFocus::Board,
                };
                None
            }
            KeyCode::Char('r') => {
                self.loading = true;
                Some(ApiCommand::FetchTasks {
                    project_id: self.scope.clone(),
                })
            }
            KeyCode::Char('n') => {
                self.screen = Screen::Notifications;
                self.selected_notification = 0;
                Some(ApiCommand::FetchNotifications)
            }
            _ if self.focus == PanelFocus::Sidebar => self.handle_sidebar_key(key),
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_row();
                }
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < board::BOARD_COLUMNS.len() {
                    self.selected_column += 1;
                    self.clamp_row();
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
                self.clamp_row();
                None
            }
            KeyCode::Char(']') => self.move_selected_task(board::column_after),
            KeyCode::Char('[') => self.move_selected_task(board::column_before),
            KeyCode::Char('c') => {
                self.task_input = Some(String::new());
                None
            }
            KeyCode::Char('x') => {
                let task_id = self.selected_task_id()?;
                Some(ApiCommand::DeleteTask(task_id))
            }
            KeyCode::Enter => {
                let task_id = self.selected_task_id()?;
                self.screen = Screen::TaskDetail(task_id.clone());
                self.selected_comment = 0;
                Some(ApiCommand::FetchComments(task_id))
            }
            _ => None,
        }
    }

    /// Handle key event while composing a quick-add task title.
    ///
    /// The new task lands in the selected column of the scoped project.
    /// Validation runs before any call goes out; a failing form stays on
    /// screen with the first error surfaced.
    fn handle_task_input_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.task_input = None;
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = &mut self.task_input {
                    input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = &mut self.task_input {
                    input.pop();
                }
                None
            }
            KeyCode::Enter => {
                let form = TaskForm {
                    title: self.task_input.clone().unwrap_or_default(),
                    status: self.selected_column_status().as_str().to_string(),
                    priority: taskdeck_api::task::TaskPriority::Medium.as_str().to_string(),
                    project_id: self
                        .scope
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                    ..TaskForm::default()
                };
                let errors = validate::validate_task_form(&form);
                if let Some((_, message)) = errors.iter().next() {
                    // The input stays on screen for another attempt.
                    self.show_toast(message, ToastKind::Error);
                    return None;
                }
                self.task_input = None;
                Some(ApiCommand::CreateTask(form.to_payload()))
            }
            _ => None,
        }
    }

    /// Handle key event when the sidebar is focused.
    fn handle_sidebar_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_project = self.selected_project.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_project + 1 < self.projects.all().len() {
                    self.selected_project += 1;
                }
                None
            }
            KeyCode::Enter => {
                let project = self.projects.all().get(self.selected_project)?;
                Some(ApiCommand::FetchProjectDetail(project.id.clone()))
            }
            KeyCode::Char('a') => {
                // Back to the all-tasks board.
                self.scope = None;
                self.projects.clear_detail();
                self.loading = true;
                Some(ApiCommand::FetchTasks { project_id: None })
            }
            _ => None,
        }
    }

    /// Resolves a board move of the selected task via the drop rules.
    ///
    /// The card is not moved locally; the command goes out and the board
    /// re-renders once the server's updated task arrives.
    fn move_selected_task(
        &mut self,
        neighbor: fn(TaskStatus) -> Option<TaskStatus>,
    ) -> Option<ApiCommand> {
        if self.pending_move {
            return None;
        }
        let dragged_id = self.selected_task_id()?;
        let target = neighbor(self.selected_column_status())?;
        let event = DropEvent {
            dragged_id: dragged_id.clone(),
            drop_target_id: target.as_str().to_string(),
        };
        let status = board::resolve_drop(self.tasks.all(), &event)?;
        self.pending_move = true;
        Some(ApiCommand::MoveTask {
            id: dragged_id,
            status,
        })
    }

    /// Handle key event on the task detail screen.
    fn handle_detail_key(&mut self, key: KeyEvent, task_id: &TaskId) -> Option<ApiCommand> {
        // Compose mode captures every key until Enter or Esc.
        if let Some(input) = &mut self.comment_input {
            match key.code {
                KeyCode::Enter => {
                    let text = input.trim().to_string();
                    self.comment_input = None;
                    if text.is_empty() {
                        return None;
                    }
                    return Some(ApiCommand::AddComment {
                        task_id: task_id.clone(),
                        text,
                    });
                }
                KeyCode::Esc => {
                    self.comment_input = None;
                }
                KeyCode::Char(c) => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen = Screen::Board;
                self.comments.clear();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_comment = self.selected_comment.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_comment + 1 < self.comments.all().len() {
                    self.selected_comment += 1;
                }
                None
            }
            KeyCode::Char('i') => {
                self.comment_input = Some(String::new());
                None
            }
            KeyCode::Char('l') => {
                let comment = self.comments.all().get(self.selected_comment)?;
                Some(ApiCommand::LikeComment(comment.id.clone()))
            }
            KeyCode::Char('d') => {
                let comment = self.comments.all().get(self.selected_comment)?;
                Some(ApiCommand::DislikeComment(comment.id.clone()))
            }
            _ => None,
        }
    }

    /// Handle key event on the notifications screen.
    fn handle_notifications_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'b') => {
                self.screen = Screen::Board;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_notification = self.selected_notification.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_notification + 1 < self.notifications.all().len() {
                    self.selected_notification += 1;
                }
                None
            }
            KeyCode::Enter => {
                let notification = self.notifications.all().get(self.selected_notification)?;
                if notification.is_read {
                    return None;
                }
                Some(ApiCommand::MarkNotificationRead(notification.id.clone()))
            }
            KeyCode::Char('a') => Some(ApiCommand::MarkAllNotificationsRead),
            _ => None,
        }
    }

    /// Applies a server event to the mirrored state, returning follow-up
    /// commands to dispatch.
    ///
    /// Loading and in-flight flags are reset on both success and error
    /// paths, so no failure leaves the screen stuck in a pending state.
    #[allow(clippy::too_many_lines)]
    pub fn apply_event(&mut self, event: ApiEvent) -> Vec<ApiCommand> {
        match event {
            ApiEvent::SessionRestored(user) | ApiEvent::LoggedIn(user) => {
                self.user = Some(user);
                self.pending_submit = false;
                self.login = LoginForm::default();
                self.screen = Screen::Board;
                self.loading = true;
                vec![
                    ApiCommand::FetchTasks { project_id: None },
                    ApiCommand::FetchProjects,
                ]
            }
            ApiEvent::SessionMissing => {
                self.pending_submit = false;
                self.screen = Screen::Login;
                Vec::new()
            }
            ApiEvent::LoggedOut => {
                self.user = None;
                self.screen = Screen::Login;
                self.show_toast("Signed out", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::Unauthorized => {
                self.user = None;
                self.pending_submit = false;
                self.pending_move = false;
                self.loading = false;
                self.screen = Screen::Login;
                self.show_toast("Session expired. Please sign in again.", ToastKind::Error);
                Vec::new()
            }
            ApiEvent::TasksLoaded(tasks) => {
                self.tasks.set(tasks);
                self.loading = false;
                self.clamp_row();
                Vec::new()
            }
            ApiEvent::TaskCreated(task) => {
                self.tasks.insert(task);
                self.show_toast("Task created successfully!", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::TaskUpdated(task) => {
                self.tasks.replace(task);
                self.show_toast("Task updated", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::TaskMoved(task) => {
                self.tasks.replace(task);
                self.pending_move = false;
                self.clamp_row();
                self.show_toast("Task moved successfully", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::TaskDeleted(id) => {
                self.tasks.remove(&id);
                self.clamp_row();
                self.show_toast("Task deleted", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::ProjectsLoaded(projects) => {
                self.projects.set(projects);
                if self.selected_project >= self.projects.all().len() {
                    self.selected_project = self.projects.all().len().saturating_sub(1);
                }
                Vec::new()
            }
            ApiEvent::ProjectDetailLoaded {
                project,
                tasks,
                members,
            } => {
                self.scope = Some(project.id.clone());
                self.projects.replace(project.clone());
                self.projects.set_detail(project.id, members);
                self.tasks.set(tasks);
                self.loading = false;
                self.focus = PanelFocus::Board;
                self.selected_column = 0;
                self.selected_row = 0;
                Vec::new()
            }
            ApiEvent::ProjectDetailUnavailable(message) => {
                // Partial success is not a valid terminal state; go back
                // to the unscoped board.
                self.scope = None;
                self.projects.clear_detail();
                self.loading = true;
                self.show_toast(message, ToastKind::Error);
                vec![ApiCommand::FetchTasks { project_id: None }]
            }
            ApiEvent::NotificationsLoaded(notifications) => {
                self.notifications.set(notifications);
                if self.selected_notification >= self.notifications.all().len() {
                    self.selected_notification = self.notifications.all().len().saturating_sub(1);
                }
                Vec::new()
            }
            ApiEvent::NotificationRead(notification) => {
                self.notifications.replace(notification);
                Vec::new()
            }
            ApiEvent::AllNotificationsRead => {
                self.notifications.mark_all_read();
                self.show_toast("All notifications marked as read", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::CommentsLoaded { task_id, comments } => {
                self.comments.set(task_id, comments);
                self.selected_comment = 0;
                Vec::new()
            }
            ApiEvent::CommentAdded(comment) => {
                self.comments.insert(comment);
                self.show_toast("Comment added", ToastKind::Success);
                Vec::new()
            }
            ApiEvent::CommentUpdated(comment) => {
                self.comments.replace(comment);
                Vec::new()
            }
            ApiEvent::Error(message) => {
                self.pending_submit = false;
                self.pending_move = false;
                self.loading = false;
                self.show_toast(message, ToastKind::Error);
                Vec::new()
            }
        }
    }

    /// Keeps the row selection within the selected column.
    fn clamp_row(&mut self) {
        let len = board::column_tasks(self.tasks.all(), self.selected_column_status()).len();
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    /// Validates a task form before submission; exposed for the create
    /// flow so validation happens before any network call.
    #[must_use]
    pub fn validate_task(form: &TaskForm) -> validate::FieldErrors {
        validate::validate_task_form(form)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
