use crate::models::{ApiResponse, LoginData, LoginRequest, UserInfo};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Upstream request timeout. Requests that exceed this are reported as
/// `ApiError::Timeout` rather than a generic network failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// 1. Error Taxonomy
/// ApiError
///
/// Every way an upstream call can fail, mapped to a stable variant so callers
/// can branch on the outcome instead of parsing strings. HTTP statuses with a
/// well-known meaning get their own variant; everything else carries the raw
/// status plus whatever message the upstream envelope offered.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: the session is missing or expired.
    #[error("unauthorized, sign in again")]
    Unauthorized,
    /// 403: the upstream refused the operation for this identity.
    #[error("access denied")]
    Forbidden,
    /// 404: the addressed resource does not exist upstream.
    #[error("requested resource not found")]
    NotFound,
    /// Any 5xx status.
    #[error("upstream server error (status {status})")]
    Server { status: u16 },
    /// Any other non-success status, with the envelope message when one was readable.
    #[error("request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The request exceeded `REQUEST_TIMEOUT`.
    #[error("request timed out, check the network")]
    Timeout,
    /// The request never produced a response (DNS, refused connection, broken transport).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The response arrived but its body was not the expected envelope shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[source] reqwest::Error),
    /// The client itself could not be built from the given configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Network(err)
        }
    }
}

// 2. UserApi Contract
/// UserApi
///
/// Defines the abstract contract for the upstream user service. This trait
/// allows us to swap the concrete implementation, from the real HTTP client
/// (ApiClient) in production to the in-memory Mock (MockUserApi) during
/// testing, without affecting the calling handlers.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetches the full user list (GET /users).
    async fn list_users(&self) -> Result<Vec<UserInfo>, ApiError>;

    /// Fetches one user by id (GET /users/{id}).
    async fn get_user(&self, id: i64) -> Result<UserInfo, ApiError>;

    /// Exchanges credentials for a session token (POST /login).
    async fn login(&self, credentials: LoginRequest) -> Result<LoginData, ApiError>;
}

// 3. The Real Implementation (HTTP)
/// ApiClient
///
/// The concrete reqwest-backed implementation. One client instance is built at
/// startup and shared across all requests; it owns the connection pool, the
/// default headers, and the request timeout. Every outbound call is tagged
/// with a fresh `x-request-id` and traced on the way out and the way back in.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// new
    ///
    /// Builds a client for the given base URL with the standard timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// with_timeout
    ///
    /// Same as `new` but with an explicit timeout. Tests use this to provoke
    /// the timeout path without waiting out the full production value.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=UTF-8"),
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;

        Ok(Self {
            http,
            // A trailing slash on the configured URL would double up when the
            // endpoint paths are appended.
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        self.dispatch(request, "GET", path).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.dispatch(request, "POST", path).await
    }

    /// dispatch
    ///
    /// The shared request/response pipeline behind every endpoint binding.
    /// Attaches the correlation id, sends, logs both directions, and funnels
    /// every failure through the `ApiError` taxonomy. On success the upstream
    /// envelope is unwrapped so callers receive the payload type directly.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(method, path, %request_id, "sending upstream request");

        let response = request
            .header("x-request-id", request_id.to_string())
            .send()
            .await
            .map_err(|err| {
                let mapped = ApiError::from(err);
                tracing::error!(method, path, %request_id, error = %mapped, "upstream request failed");
                mapped
            })?;

        let status = response.status();
        tracing::debug!(method, path, %request_id, status = status.as_u16(), "upstream response received");

        if !status.is_success() {
            let mapped = Self::map_status(status, response).await;
            tracing::error!(method, path, %request_id, error = %mapped, "upstream returned an error status");
            return Err(mapped);
        }

        let envelope: ApiResponse<T> = response.json().await.map_err(ApiError::from)?;
        Ok(envelope.data)
    }

    /// map_status
    ///
    /// Translates a non-success HTTP status into the error taxonomy. For the
    /// unmapped statuses the body is inspected once for an envelope `message`
    /// field, which is usually the most useful detail the upstream gives us.
    async fn map_status(status: StatusCode, response: reqwest::Response) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            status if status.is_server_error() => ApiError::Server {
                status: status.as_u16(),
            },
            status => {
                let message = response
                    .text()
                    .await
                    .ok()
                    .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
                    .and_then(|value| {
                        value
                            .get("message")
                            .and_then(|message| message.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| "request failed".to_string());

                ApiError::Rejected {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl UserApi for ApiClient {
    async fn list_users(&self) -> Result<Vec<UserInfo>, ApiError> {
        self.get("/users").await
    }

    async fn get_user(&self, id: i64) -> Result<UserInfo, ApiError> {
        self.get(&format!("/users/{}", id)).await
    }

    async fn login(&self, credentials: LoginRequest) -> Result<LoginData, ApiError> {
        self.post("/login", &credentials).await
    }
}

// 4. The Mock Implementation (For Unit Tests)
/// MockUserApi
///
/// A mock implementation of `UserApi` used exclusively for unit and
/// integration testing. This allows us to test the proxy handler logic without
/// requiring a live upstream service, isolating the test boundary.
#[derive(Clone)]
pub struct MockUserApi {
    /// When true, all operations return a simulated upstream failure.
    pub should_fail: bool,
    /// The canned user set served by the mock.
    pub users: Vec<UserInfo>,
}

impl MockUserApi {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            users: vec![
                UserInfo {
                    id: 1,
                    name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    avatar: None,
                },
                UserInfo {
                    id: 2,
                    name: "Grace Hopper".to_string(),
                    email: "grace@example.com".to_string(),
                    avatar: Some("https://example.com/avatars/grace.png".to_string()),
                },
            ],
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            users: Vec::new(),
        }
    }
}

#[async_trait]
impl UserApi for MockUserApi {
    async fn list_users(&self) -> Result<Vec<UserInfo>, ApiError> {
        if self.should_fail {
            return Err(ApiError::Server { status: 500 });
        }
        Ok(self.users.clone())
    }

    async fn get_user(&self, id: i64) -> Result<UserInfo, ApiError> {
        if self.should_fail {
            return Err(ApiError::Server { status: 500 });
        }
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn login(&self, credentials: LoginRequest) -> Result<LoginData, ApiError> {
        if self.should_fail {
            return Err(ApiError::Unauthorized);
        }
        // Deterministic token for mock assertions.
        Ok(LoginData {
            token: format!("mock-token-{}", credentials.username),
            user: self.users.first().cloned().unwrap_or_default(),
        })
    }
}

/// UserApiState
///
/// The concrete type used to share the upstream user client across the
/// application state.
pub type UserApiState = Arc<dyn UserApi>;
