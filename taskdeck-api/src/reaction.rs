//! Comment reaction transitions.
//!
//! Each (comment, user) pair is in one of three states: no reaction,
//! liked, or disliked. Reacting with the current state is idempotent;
//! switching moves one count to the other. There is no un-react.

use serde::{Deserialize, Serialize};

/// A user's reaction to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reaction {
    /// Thumbs up.
    Like,
    /// Thumbs down.
    Dislike,
}

/// Reaction counters plus the acting user's own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionCounts {
    /// Total number of likes.
    pub likes: u64,
    /// Total number of dislikes.
    pub dislikes: u64,
    /// The acting user's current reaction, if any.
    pub user_reaction: Option<Reaction>,
}

impl ReactionCounts {
    /// Applies a reaction from the acting user.
    ///
    /// Transition table (current state, action):
    /// - none  + like    -> liked, likes + 1
    /// - dislike + like  -> liked, dislikes - 1, likes + 1
    /// - like  + like    -> unchanged
    /// - the dislike action is symmetric
    pub fn react(&mut self, reaction: Reaction) {
        if self.user_reaction == Some(reaction) {
            return;
        }
        match self.user_reaction {
            Some(Reaction::Like) => self.likes = self.likes.saturating_sub(1),
            Some(Reaction::Dislike) => self.dislikes = self.dislikes.saturating_sub(1),
            None => {}
        }
        match reaction {
            Reaction::Like => self.likes += 1,
            Reaction::Dislike => self.dislikes += 1,
        }
        self.user_reaction = Some(reaction);
    }
}
