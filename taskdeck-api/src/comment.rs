//! Task comments and their reaction counters.

use serde::{Deserialize, Serialize};

use crate::reaction::{Reaction, ReactionCounts};
use crate::task::TaskId;
use crate::user::{User, UserId};

/// Unique identifier for a comment. Opaque string assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Creates a `CommentId` from a raw string value.
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

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A comment on a task as returned by the server.
///
/// `user_reaction` is the requesting user's own reaction, so the same
/// comment may deserialize differently for different users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Task this comment belongs to.
    pub task_id: TaskId,
    /// Author's user id.
    pub author_id: UserId,
    /// Expanded author record, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Total number of likes.
    #[serde(default)]
    pub likes_count: u64,
    /// Total number of dislikes.
    #[serde(default)]
    pub dislikes_count: u64,
    /// The requesting user's reaction, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<Reaction>,
}

impl Comment {
    /// Applies a reaction from the requesting user, updating the counters
    /// and `user_reaction` per the reaction transition rules.
    pub fn apply_reaction(&mut self, reaction: Reaction) {
        let mut counts = ReactionCounts {
            likes: self.likes_count,
            dislikes: self.dislikes_count,
            user_reaction: self.user_reaction,
        };
        counts.react(reaction);
        self.likes_count = counts.likes;
        self.dislikes_count = counts.dislikes;
        self.user_reaction = counts.user_reaction;
    }
}

/// Payload for posting a new comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    /// Comment body.
    pub text: String,
}
