//! Authentication endpoints.

use serde::{Deserialize, Serialize};

use taskdeck_api::endpoints;
use taskdeck_api::user::RawUser;

use super::{ApiClient, ApiError};

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Response to register and login calls: a bearer token plus the user's
/// own record (still in wire shape; normalize at the boundary).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's wire record.
    #[serde(flatten)]
    pub user: RawUser,
}

/// Creates an account and returns the initial session.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    client.post(endpoints::AUTH_REGISTER, request).await
}

/// Exchanges credentials for a session.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
    client.post(endpoints::AUTH_LOGIN, request).await
}

/// Invalidates the session server-side, best effort.
///
/// A failed call is logged and otherwise ignored: local credentials are
/// cleared by the caller regardless of the outcome.
pub async fn logout(client: &ApiClient) {
    if let Err(e) = client.post_empty(endpoints::AUTH_LOGOUT).await {
        tracing::debug!(error = %e, "logout call failed; clearing local session anyway");
    }
}
