//! Mirrored task list.

use taskdeck_api::task::{Task, TaskId};

/// The task list as last returned by the server.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list with a fresh server response.
    pub fn set(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Appends a newly created task.
    pub fn insert(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replaces the task with the same id, if present. An update for an
    /// unknown id is ignored rather than inserted; the next full fetch
    /// reconciles.
    pub fn replace(&mut self, task: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
    }

    /// Removes the task with the given id, if present.
    pub fn remove(&mut self, id: &TaskId) {
        self.tasks.retain(|t| t.id != *id);
    }

    /// The current list, in server order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Number of tasks currently mirrored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
