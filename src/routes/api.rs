use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Api Router Module
///
/// Defines the JSON endpoints the portal fronts for the upstream user
/// service. These are plain pass-through routes; upstream error mapping lives
/// in the handlers and the client, not here.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /api/users
        // Lists every user the upstream service reports.
        .route("/api/users", get(handlers::list_users))
        // GET /api/users/{id}
        // Retrieves one user record by numeric id.
        .route("/api/users/{id}", get(handlers::get_user))
        // POST /api/login
        // Exchanges credentials for a session token issued upstream.
        .route("/api/login", post(handlers::login))
}
