use crate::{
    AppState,
    client::ApiError,
    models::{LoginData, LoginRequest, UserInfo},
    pages::PageHandle,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

// --- Page Handlers ---

/// serve_page
///
/// The single handler behind every mounted day page. The route table hands
/// each mounted route a captured view handle; this function renders it per
/// request. Render failures (for example a page file deleted after startup)
/// are logged and collapse to a plain 500 so no filesystem detail leaks out.
pub async fn serve_page(view: PageHandle) -> Result<Html<String>, StatusCode> {
    match view.render().await {
        Ok(body) => Ok(Html(body)),
        Err(err) => {
            tracing::error!(error = %err, "page render failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// --- Proxy Handlers ---

/// list_users
///
/// [Proxy Route] Lists all users known to the upstream service.
/// The upstream envelope is already unwrapped by the client, so the response
/// body is the bare user array.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All Users", body = [UserInfo]),
        (status = 502, description = "Upstream Failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>, StatusCode> {
    state.users.list_users().await.map(Json).map_err(error_status)
}

/// get_user
///
/// [Proxy Route] Retrieves a single user by id from the upstream service.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    responses(
        (status = 200, description = "User", body = UserInfo),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Upstream Failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserInfo>, StatusCode> {
    state.users.get_user(id).await.map(Json).map_err(error_status)
}

/// login
///
/// [Proxy Route] Forwards credentials to the upstream sign-in endpoint and
/// returns the session token plus user record on success.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed In", body = LoginData),
        (status = 401, description = "Bad Credentials"),
        (status = 502, description = "Upstream Failure")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginData>, StatusCode> {
    state.users.login(payload).await.map(Json).map_err(error_status)
}

/// error_status
///
/// Maps a client error onto the HTTP status the proxy endpoint answers with.
/// Statuses with a direct upstream meaning are relayed as-is; transport-level
/// failures surface as gateway errors so the caller can tell "the portal is
/// broken" apart from "the upstream rejected you".
fn error_status(err: ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::Forbidden => StatusCode::FORBIDDEN,
        ApiError::NotFound => StatusCode::NOT_FOUND,
        ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        // Unmapped upstream statuses are relayed when representable.
        ApiError::Rejected { status, .. } => {
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ApiError::Server { .. } | ApiError::Network(_) | ApiError::Decode(_) | ApiError::Config(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}
