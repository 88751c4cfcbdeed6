//! HTTP service layer.
//!
//! [`ApiClient`] owns the reqwest client, the API base URL, and the
//! current bearer token. The per-resource modules ([`auth`], [`users`],
//! [`projects`], [`tasks`], [`notifications`]) are thin typed wrappers
//! over it, one function per endpoint. Errors map onto the taxonomy the
//! UI acts on: 401 forces a sign-out, 403 is a denied action, 404 and
//! 409 carry the server's message, and transport failures surface as
//! connectivity errors.

pub mod auth;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod users;

use parking_lot::RwLock;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;

/// Errors produced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the token (HTTP 401). The caller must clear
    /// stored credentials and return to the login screen.
    #[error("not authenticated")]
    Unauthorized,

    /// The action is not permitted for this user (HTTP 403).
    #[error("{0}")]
    Forbidden(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with existing state (HTTP 409), e.g. a
    /// duplicate project membership. Carries the server's message
    /// verbatim when one was provided.
    #[error("{0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("request failed ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided or fallback message.
        message: String,
    },

    /// The request never produced a response (DNS, refused connection,
    /// timeout) or the response body could not be decoded.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base URL is not a valid URL.
    #[error("invalid API base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Message suitable for a transient toast notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Session expired. Please sign in again.".to_string(),
            Self::Network(_) => "Network error: please check your connection".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error body shape returned by the server: `{"message": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// HTTP client for the task board API.
///
/// Cheap to share by reference; the token cell is interior-mutable so
/// login and logout do not need exclusive access to the client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Builds a client from the resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the base URL does not parse or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        // Parse once to reject malformed base URLs up front; requests are
        // built by concatenation so `/api` prefixes survive.
        Url::parse(&config.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Installs the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Removes the bearer token.
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    /// Returns a copy of the current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, &[]).await
    }

    /// `GET` a JSON resource with query parameters.
    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, query).await
    }

    /// `POST` a JSON body, decoding a JSON response.
    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    /// `POST` without a body, decoding a JSON response.
    pub(crate) async fn post_unit<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, None::<&()>, &[]).await
    }

    /// `POST` without a body, ignoring the response body.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.request_empty(Method::POST, path, None::<&()>).await
    }

    /// `PUT` a JSON body, decoding a JSON response.
    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(body), &[]).await
    }

    /// `PUT` without a body, decoding a JSON response.
    pub(crate) async fn put_unit<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::PUT, path, None::<&()>, &[]).await
    }

    /// `PUT` without a body, ignoring the response body.
    pub(crate) async fn put_empty(&self, path: &str) -> Result<(), ApiError> {
        self.request_empty(Method::PUT, path, None::<&()>).await
    }

    /// `DELETE`, ignoring the response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, path, None::<&()>).await
    }

    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, body, query).await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn request_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, body, &[]).await?;
        Self::checked(response).await?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, &str)],
    ) -> Result<Response, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        tracing::debug!(%url, "api request");
        Ok(request.send().await?)
    }

    /// Maps non-success statuses onto the error taxonomy, extracting the
    /// server's `{"message"}` body when present.
    async fn checked(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(|body| body.message);

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(
                message.unwrap_or_else(|| "Access denied: insufficient permissions".to_string()),
            ),
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()))
            }
            StatusCode::CONFLICT => {
                ApiError::Conflict(message.unwrap_or_else(|| "Request conflict".to_string()))
            }
            other => ApiError::Status {
                status: other.as_u16(),
                message: message.unwrap_or_else(|| {
                    other.canonical_reason().unwrap_or("request failed").to_string()
                }),
            },
        })
    }
}
