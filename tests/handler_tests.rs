use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use daybook_portal::{
    AppConfig, AppState, MockUserApi, handlers,
    models::LoginRequest,
    pages::{FileView, InlineView},
};
use std::sync::Arc;
use tokio::test;

// --- Test Utilities ---

// Creates an AppState using mock components. Handlers rely on the UserApi
// trait, so the mock slots straight in.
fn create_test_state(users: MockUserApi) -> AppState {
    AppState {
        users: Arc::new(users),
        config: AppConfig::default(),
    }
}

fn login_payload(username: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: "hunter2".to_string(),
    }
}

// --- Proxy Handler Tests ---

#[test]
async fn test_list_users_success() {
    let state = create_test_state(MockUserApi::new());

    let result = handlers::list_users(State(state)).await;

    assert!(result.is_ok());
    let Json(users) = result.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Ada Lovelace");
}

#[test]
async fn test_list_users_upstream_failure_is_bad_gateway() {
    let state = create_test_state(MockUserApi::new_failing());

    let result = handlers::list_users(State(state)).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), StatusCode::BAD_GATEWAY);
}

#[test]
async fn test_get_user_success() {
    let state = create_test_state(MockUserApi::new());

    let result = handlers::get_user(State(state), Path(2)).await;

    assert!(result.is_ok());
    let Json(user) = result.unwrap();
    assert_eq!(user.id, 2);
    assert_eq!(user.name, "Grace Hopper");
}

#[test]
async fn test_get_user_not_found() {
    let state = create_test_state(MockUserApi::new());

    let result = handlers::get_user(State(state), Path(99)).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[test]
async fn test_login_success() {
    let state = create_test_state(MockUserApi::new());

    let result = handlers::login(State(state), Json(login_payload("ada"))).await;

    assert!(result.is_ok());
    let Json(session) = result.unwrap();
    assert_eq!(session.token, "mock-token-ada");
    assert_eq!(session.user.id, 1);
}

#[test]
async fn test_login_failure_is_unauthorized() {
    let state = create_test_state(MockUserApi::new_failing());

    let result = handlers::login(State(state), Json(login_payload("ada"))).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}

// --- Page Handler Tests ---

#[test]
async fn test_serve_page_renders_the_view() {
    let view = Arc::new(InlineView::new("<h1>hello</h1>"));

    let result = handlers::serve_page(view).await;

    assert!(result.is_ok());
    let Html(body) = result.unwrap();
    assert_eq!(body, "<h1>hello</h1>");
}

#[test]
async fn test_serve_page_render_failure_is_internal_error() {
    let view = Arc::new(FileView::new("/definitely/not/a/real/file.html"));

    let result = handlers::serve_page(view).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err(), StatusCode::INTERNAL_SERVER_ERROR);
}
