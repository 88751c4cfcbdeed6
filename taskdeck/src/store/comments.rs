//! Mirrored comment list for the task currently being viewed.

use taskdeck_api::comment::{Comment, CommentId};
use taskdeck_api::task::TaskId;

/// Comments of the task currently open, as last returned by the server.
///
/// Reaction counts are never computed locally; a like or dislike
/// response replaces the whole comment record.
#[derive(Debug, Default)]
pub struct CommentStore {
    task_id: Option<TaskId>,
    comments: Vec<Comment>,
}

impl CommentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the comment list for a task.
    pub fn set(&mut self, task_id: TaskId, comments: Vec<Comment>) {
        self.task_id = Some(task_id);
        self.comments = comments;
    }

    /// Appends a newly posted comment, if it belongs to the current task.
    pub fn insert(&mut self, comment: Comment) {
        if self.task_id.as_ref() == Some(&comment.task_id) {
            self.comments.push(comment);
        }
    }

    /// Replaces the comment with the same id, if present. Used for the
    /// updated record returned by like/dislike calls.
    pub fn replace(&mut self, comment: Comment) {
        if let Some(existing) = self.comments.iter_mut().find(|c| c.id == comment.id) {
            *existing = comment;
        }
    }

    /// Clears the store when leaving the task view.
    pub fn clear(&mut self) {
        self.task_id = None;
        self.comments.clear();
    }

    /// The current list, in server order.
    #[must_use]
    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    /// Looks up a comment by id.
    #[must_use]
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *id)
    }

    /// The task whose comments are mirrored, if any.
    #[must_use]
    pub fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_api::reaction::Reaction;
    use taskdeck_api::user::UserId;

    fn make_comment(id: &str, task: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            task_id: TaskId::new(task),
            author_id: UserId::new("u-1"),
            author: None,
            text: format!("Comment {id}"),
            created_at: "2024-05-01T10:00:00".to_string(),
            likes_count: 0,
            dislikes_count: 0,
            user_reaction: None,
        }
    }

    #[test]
    fn set_installs_task_and_comments() {
        let mut store = CommentStore::new();
        store.set(TaskId::new("t-1"), vec![make_comment("c-1", "t-1")]);
        assert_eq!(store.task_id(), Some(&TaskId::new("t-1")));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn insert_ignores_other_tasks() {
        let mut store = CommentStore::new();
        store.set(TaskId::new("t-1"), vec![]);
        store.insert(make_comment("c-1", "t-1"));
        store.insert(make_comment("c-2", "t-other"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn replace_swaps_reaction_state() {
        let mut store = CommentStore::new();
        store.set(TaskId::new("t-1"), vec![make_comment("c-1", "t-1")]);

        let mut liked = make_comment("c-1", "t-1");
        liked.likes_count = 1;
        liked.user_reaction = Some(Reaction::Like);
        store.replace(liked);

        let comment = store.get(&CommentId::new("c-1")).unwrap();
        assert_eq!(comment.likes_count, 1);
        assert_eq!(comment.user_reaction, Some(Reaction::Like));
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = CommentStore::new();
        store.set(TaskId::new("t-1"), vec![make_comment("c-1", "t-1")]);
        store.clear();
        assert!(store.task_id().is_none());
        assert!(store.all().is_empty());
    }
}
