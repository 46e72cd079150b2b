use daybook_portal::{
    AppConfig, AppState, MockUserApi, create_router,
    pages::{FileView, InlineView, PageSource, StaticPages},
    routes::table::RouteTable,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app(source: StaticPages) -> TestApp {
    let pages = source.pages().expect("static source cannot fail");
    let table = RouteTable::build(pages);

    let state = AppState {
        users: Arc::new(MockUserApi::new()),
        config: AppConfig::default(),
    };
    let router = create_router(state, &table);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

/// A client that reports redirects instead of following them, so the home
/// entry's status and target are observable.
fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(StaticPages::with_defaults()).await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_home_redirects_to_the_first_day() {
    let app = spawn_app(StaticPages::with_defaults()).await;
    let client = no_redirect_client();

    let response = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 307);
    let location = response.headers().get("location").unwrap();
    assert_eq!(location, "/day1");
}

#[tokio::test]
async fn test_home_redirect_follows_numeric_order() {
    let mut source = StaticPages::new();
    source.register("views/Day12.html", Arc::new(InlineView::new("twelve")));
    source.register("views/Day3.html", Arc::new(InlineView::new("three")));
    let app = spawn_app(source).await;
    let client = no_redirect_client();

    let response = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();

    // Day3 is first numerically even though Day12 was registered first.
    assert_eq!(response.headers().get("location").unwrap(), "/day3");
}

#[tokio::test]
async fn test_home_falls_back_when_no_pages_exist() {
    let app = spawn_app(StaticPages::new()).await;
    let client = no_redirect_client();

    let response = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap();

    // The redirect target is synthesized even though nothing answers there.
    assert_eq!(response.status(), 307);
    assert_eq!(response.headers().get("location").unwrap(), "/day1");

    let target = client
        .get(format!("{}/day1", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(target.status(), 404);
}

#[tokio::test]
async fn test_day_pages_serve_their_html() {
    let app = spawn_app(StaticPages::with_defaults()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/day1", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.unwrap();
    assert!(body.contains("<h1>Day 1</h1>"));
}

#[tokio::test]
async fn test_unknown_day_is_not_found() {
    let app = spawn_app(StaticPages::with_defaults()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/day99", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_degenerate_page_mounts_at_bare_day_path() {
    let mut source = StaticPages::with_defaults();
    source.register("views/Notes.txt", Arc::new(InlineView::new("scratchpad")));
    let app = spawn_app(source).await;
    let client = reqwest::Client::new();

    // An identifier without a day suffix still gets a (degenerate) route.
    let response = client
        .get(format!("{}/day", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "scratchpad");
}

#[tokio::test]
async fn test_duplicate_paths_keep_the_first_page() {
    let mut source = StaticPages::new();
    source.register("second/Day5.html", Arc::new(InlineView::new("second wins?")));
    source.register("first/Day5.html", Arc::new(InlineView::new("first wins")));
    let app = spawn_app(source).await;
    let client = reqwest::Client::new();

    // Both identifiers derive /day5. Mounting must not panic, and the page
    // earlier in table order (identifier order on a tie) answers.
    let response = client
        .get(format!("{}/day5", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "first wins");
}

#[tokio::test]
async fn test_render_failure_surfaces_as_internal_error() {
    let mut source = StaticPages::with_defaults();
    source.register(
        "views/Day8.html",
        Arc::new(FileView::new("/definitely/not/a/real/file.html")),
    );
    let app = spawn_app(source).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/day8", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    // The healthy pages are unaffected.
    let healthy = client
        .get(format!("{}/day1", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(healthy.status(), 200);
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let app = spawn_app(StaticPages::with_defaults()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();

    // The correlation id layer tags every response.
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header missing")
        .to_str()
        .unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}
