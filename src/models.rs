use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Upstream Wire Schemas ---

/// ApiResponse
///
/// The envelope every upstream endpoint wraps its payload in: an application
/// status code, a human-readable message, and the actual data. The client
/// unwraps this at the decode boundary, so handlers and callers only ever see
/// the inner payload types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Application-level status code, independent of the HTTP status.
    pub code: i32,
    /// Human-readable outcome, surfaced in error logs when a request is rejected.
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Convenience constructor for the success shape, used by test fixtures
    /// standing in for the upstream service.
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            message: "ok".to_string(),
            data,
        }
    }
}

/// UserInfo
///
/// A single user record as the upstream service reports it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    // Optional avatar URL; omitted from JSON entirely when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

// --- Request Payloads (Input Schemas) ---

/// LoginRequest
///
/// Input payload for the sign-in endpoint (POST /api/login).
/// The password is only passed through to the upstream service and is never
/// persisted or logged by this application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// --- Response Payloads (Output Schemas) ---

/// LoginData
///
/// Output schema of a successful sign-in: the session token plus the resolved
/// user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub user: UserInfo,
}
