//! Board state projection and drop resolution.
//!
//! The board derives per-column task lists from the flat task collection
//! and resolves drop gestures into status changes. Resolution is a pure
//! function over an explicit [`DropEvent`], keeping the board rules
//! independent of whatever gesture handling feeds them.

use std::collections::HashMap;

use crate::task::{Task, TaskId, TaskStatus};

/// Board columns in display order, one per status.
pub const BOARD_COLUMNS: [TaskStatus; 5] = TaskStatus::ALL;

/// Tasks belonging to one board column, ordered by ascending `position`.
///
/// Missing positions sort as 0. The sort is stable, so ties keep the
/// collection order.
#[must_use]
pub fn column_tasks(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    let mut column: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
    column.sort_by_key(|t| t.position.unwrap_or(0));
    column
}

/// Groups tasks by their status. Only statuses with at least one task
/// appear as keys.
#[must_use]
pub fn group_by_status(tasks: &[Task]) -> HashMap<TaskStatus, Vec<&Task>> {
    let mut groups: HashMap<TaskStatus, Vec<&Task>> = HashMap::new();
    for task in tasks {
        groups.entry(task.status).or_default().push(task);
    }
    groups
}

/// A completed drop gesture: which task was dragged and what it was
/// dropped on. The target is either a status column key or another
/// task's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// The task being dragged.
    pub dragged_id: TaskId,
    /// The drop target: a status key or a task id.
    pub drop_target_id: String,
}

/// Resolves a drop event to the status the dragged task should move to.
///
/// Returns `None` when no update call should be made:
/// - the dragged task is not in the collection
/// - the target is neither a status key nor a known task id
/// - the resolved status equals the task's current status
///
/// A `Some(status)` result means exactly one update carrying only the
/// new status should be issued for the dragged task.
#[must_use]
pub fn resolve_drop(tasks: &[Task], event: &DropEvent) -> Option<TaskStatus> {
    let task = tasks.iter().find(|t| t.id == event.dragged_id)?;

    let target_status = TaskStatus::from_key(&event.drop_target_id).or_else(|| {
        tasks
            .iter()
            .find(|t| t.id.as_str() == event.drop_target_id)
            .map(|t| t.status)
    })?;

    (target_status != task.status).then_some(target_status)
}

/// The column that precedes `status` in display order, if any.
#[must_use]
pub fn column_before(status: TaskStatus) -> Option<TaskStatus> {
    let idx = BOARD_COLUMNS.iter().position(|s| *s == status)?;
    idx.checked_sub(1).map(|i| BOARD_COLUMNS[i])
}

/// The column that follows `status` in display order, if any.
#[must_use]
pub fn column_after(status: TaskStatus) -> Option<TaskStatus> {
    let idx = BOARD_COLUMNS.iter().position(|s| *s == status)?;
    BOARD_COLUMNS.get(idx + 1).copied()
}
