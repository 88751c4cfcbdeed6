//! Form-shaped records and the payload normalizer.
//!
//! Forms hold every field as a string, exactly as collected from input
//! widgets. [`TaskForm::to_payload`] turns a form into an API-ready
//! [`TaskPayload`]: date-only due dates gain a midnight time component,
//! hour fields parse to numbers, and blank optional fields are omitted
//! entirely rather than sent as `null` or empty strings.

use serde::{Deserialize, Serialize};

use crate::project::ProjectId;
use crate::task::{TaskPriority, TaskStatus};
use crate::user::UserId;

/// Raw task form values, all strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Task title.
    pub title: String,
    /// Free-form description; empty means unset.
    pub description: String,
    /// Status key (e.g. `TODO`).
    pub status: String,
    /// Priority key (e.g. `MEDIUM`).
    pub priority: String,
    /// Owning project id.
    pub project_id: String,
    /// Assignee user id; empty means unassigned.
    pub assigned_to_id: String,
    /// Date-only due date (`YYYY-MM-DD`); empty means none.
    pub due_date: String,
    /// Estimated hours as typed; empty means unset.
    pub estimated_hours: String,
    /// Actual hours as typed; empty means unset.
    pub actual_hours: String,
}

/// Raw project form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Display color hex string.
    pub color: String,
}

/// Raw registration form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; must equal `password`.
    pub confirm_password: String,
}

/// API-ready task payload for create and update calls. Absent fields are
/// left out of the serialized record entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPayload {
    /// Task title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Board column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// Owning project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// Assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<UserId>,
    /// Full due timestamp (`YYYY-MM-DDTHH:MM:SS`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Estimated effort in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    /// Actual effort in hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    /// Ordering key within the board column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl TaskPayload {
    /// Payload carrying only a status change, as issued by board moves.
    #[must_use]
    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl TaskForm {
    /// Normalizes this form into an API-ready payload.
    ///
    /// Each rule applies independently:
    /// - a non-blank date-only `due_date` gains a `T00:00:00` suffix; a
    ///   blank one is omitted
    /// - non-blank hour fields parse to `f64`; blank or unparseable ones
    ///   are omitted
    /// - blank `assigned_to_id` and `description` are omitted
    #[must_use]
    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            status: TaskStatus::from_key(&self.status),
            priority: TaskPriority::from_key(&self.priority),
            project_id: non_empty(&self.project_id).map(ProjectId::new),
            assigned_to_id: non_empty(&self.assigned_to_id).map(UserId::new),
            due_date: normalize_due_date(&self.due_date),
            estimated_hours: parse_hours(&self.estimated_hours),
            actual_hours: parse_hours(&self.actual_hours),
            position: None,
        }
    }
}

/// Formats a stored full timestamp back into a date-only input value by
/// taking the substring before the time separator. Lossy by design: the
/// time of day is dropped, matching the one-way editing flow.
#[must_use]
pub fn format_date_for_input(date_time: &str) -> &str {
    date_time.split('T').next().unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn normalize_due_date(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    if value.contains('T') {
        Some(value.to_string())
    } else {
        Some(format!("{value}T00:00:00"))
    }
}

fn parse_hours(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
