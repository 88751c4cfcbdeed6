//! User records and the ingestion-boundary normalization.
//!
//! Different endpoints describe users with slightly different shapes:
//! some key the identifier as `userId` instead of `id`, some carry a
//! composed `userName` instead of first/last names. [`RawUser`] accepts
//! all of those and [`RawUser::normalize`] maps every inbound record to
//! the one canonical [`User`] shape before it reaches any other layer.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user. Opaque string assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId` from a raw string value.
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

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The canonical user shape used everywhere past the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Server-side role (e.g. `ADMIN`), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Full display name, `"First Last"` with empty parts collapsed.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        name.trim().to_string()
    }

    /// Uppercase initials from the first and last name.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.first_name, &self.last_name)
    }
}

/// Uppercase initials from a first and last name; missing parts are skipped.
#[must_use]
pub fn initials(first_name: &str, last_name: &str) -> String {
    let first = first_name.chars().next().map(|c| c.to_uppercase().to_string());
    let last = last_name.chars().next().map(|c| c.to_uppercase().to_string());
    format!(
        "{}{}",
        first.unwrap_or_default(),
        last.unwrap_or_default()
    )
}

/// A user-like record as it appears on the wire, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    /// Identifier, keyed as either `id` or `userId`.
    #[serde(default, alias = "userId")]
    pub id: Option<UserId>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Given name, when the record carries split names.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name, when the record carries split names.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Composed display name, when the record carries only one field.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Server-side role, when present.
    #[serde(default)]
    pub role: Option<String>,
}

impl RawUser {
    /// Maps this record to the canonical [`User`] shape.
    ///
    /// Returns `None` when the record has no identifier under either key;
    /// such records are dropped at the boundary rather than flowing on
    /// with a made-up id.
    #[must_use]
    pub fn normalize(self) -> Option<User> {
        let id = self.id?;
        let (first_name, last_name) = match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => (first, last),
            (Some(first), None) => (first, String::new()),
            (None, Some(last)) => (String::new(), last),
            (None, None) => split_user_name(self.user_name.as_deref().unwrap_or_default()),
        };
        Some(User {
            id,
            email: self.email.unwrap_or_default(),
            first_name,
            last_name,
            role: self.role,
        })
    }
}

/// Splits a composed display name on the first space.
fn split_user_name(user_name: &str) -> (String, String) {
    match user_name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (user_name.to_string(), String::new()),
    }
}

/// Normalizes a batch of wire records, dropping any without an identifier.
#[must_use]
pub fn normalize_all(raw: Vec<RawUser>) -> Vec<User> {
    raw.into_iter().filter_map(RawUser::normalize).collect()
}
