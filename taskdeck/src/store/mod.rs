//! In-memory mirrored collections.
//!
//! Each store exclusively owns one list fetched from the server. Lists
//! are replaced wholesale on fetch and patched only by single-item
//! replace/insert/remove-by-identifier when a mutation response arrives.
//! Nothing here guesses server state: until a response lands, the
//! previously displayed list is what the user continues to see.

pub mod comments;
pub mod notifications;
pub mod projects;
pub mod tasks;

pub use comments::CommentStore;
pub use notifications::NotificationStore;
pub use projects::ProjectStore;
pub use tasks::TaskStore;
