//! User and profile endpoints.

use serde::{Deserialize, Serialize};

use taskdeck_api::endpoints;
use taskdeck_api::user::{RawUser, User, normalize_all};

use super::{ApiClient, ApiError};

/// Payload for `PUT /users/profile`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

/// Per-user task statistics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    /// Projects the user belongs to.
    pub total_projects: u64,
    /// Tasks assigned to the user.
    pub total_tasks: u64,
    /// Of those, tasks in `DONE`.
    pub completed_tasks: u64,
}

/// Fetches the authenticated user's profile, normalized.
pub async fn profile(client: &ApiClient) -> Result<User, ApiError> {
    let raw: RawUser = client.get(endpoints::USERS_PROFILE).await?;
    raw.normalize().ok_or(ApiError::Status {
        status: 200,
        message: "profile record without an id".to_string(),
    })
}

/// Updates the authenticated user's profile.
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    let raw: RawUser = client.put(endpoints::USERS_PROFILE, update).await?;
    raw.normalize().ok_or(ApiError::Status {
        status: 200,
        message: "profile record without an id".to_string(),
    })
}

/// Deletes the authenticated user's account.
pub async fn delete_account(client: &ApiClient) -> Result<(), ApiError> {
    client.delete(endpoints::USERS_ACCOUNT).await
}

/// Fetches the authenticated user's task statistics.
pub async fn statistics(client: &ApiClient) -> Result<UserStatistics, ApiError> {
    client.get(endpoints::USERS_STATISTICS).await
}

/// Searches users by name or email.
pub async fn search(client: &ApiClient, query: &str) -> Result<Vec<User>, ApiError> {
    let raw: Vec<RawUser> = client
        .get_query(endpoints::USERS_SEARCH, &[("q", query)])
        .await?;
    Ok(normalize_all(raw))
}

/// Lists every user, normalized.
pub async fn all(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    let raw: Vec<RawUser> = client.get(endpoints::USERS_ALL).await?;
    Ok(normalize_all(raw))
}
