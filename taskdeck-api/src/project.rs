//! Project entity, membership roles, and project-level helpers.

use serde::{Deserialize, Serialize};

use crate::user::{User, UserId};

/// Unique identifier for a project. Opaque string assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a `ProjectId` from a raw string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role of a user within a project.
///
/// Every project has exactly one owner. Owners and editors may mutate
/// project metadata; only the owner may delete the project or remove
/// members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectRole {
    /// Full control, exactly one per project.
    Owner,
    /// May mutate project metadata and tasks.
    Editor,
    /// Read-only membership.
    Viewer,
}

impl ProjectRole {
    /// Returns the wire form of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }

    /// Whether this role may mutate project metadata.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

impl std::fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Display color as a hex string (e.g. `#3B82F6`).
    pub color: String,
    /// User who owns the project.
    pub owner_id: UserId,
    /// Creation timestamp, server-assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A project membership record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    /// Membership record identifier.
    pub id: String,
    /// The member's user id.
    pub user_id: UserId,
    /// The member's role in the project.
    pub role: ProjectRole,
    /// Expanded user record, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Whether the given user may mutate the project's metadata: the owner
/// always can, otherwise membership with an elevated role is required.
#[must_use]
pub fn can_edit(project: &Project, members: &[ProjectMember], user_id: &UserId) -> bool {
    if project.owner_id == *user_id {
        return true;
    }
    members
        .iter()
        .any(|m| m.user_id == *user_id && m.role.is_elevated())
}

/// Whether the given user may delete the project or remove members.
/// Only the owner may.
#[must_use]
pub fn can_delete(project: &Project, user_id: &UserId) -> bool {
    project.owner_id == *user_id
}

/// Fixed palette of suggested project colors.
pub const PROJECT_COLORS: [&str; 8] = [
    "#3B82F6", // Blue
    "#10B981", // Green
    "#F59E0B", // Yellow
    "#EF4444", // Red
    "#8B5CF6", // Purple
    "#EC4899", // Pink
    "#14B8A6", // Teal
    "#F97316", // Orange
];

/// Picks a random color from the fixed palette for a new project.
#[must_use]
pub fn suggested_color() -> &'static str {
    use rand::Rng;
    let idx = rand::rng().random_range(0..PROJECT_COLORS.len());
    PROJECT_COLORS[idx]
}

/// Percentage of completed tasks, rounded to the nearest integer.
/// Zero total yields zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}
