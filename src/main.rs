use daybook_portal::{
    AppState, UserApiState,
    client::ApiClient,
    config::{AppConfig, Env},
    create_router,
    pages::{DirectoryPages, PageSource, StaticPages},
    routes::table::RouteTable,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for initializing
/// all core components: Configuration, Logging, Pages, the Upstream Client, and
/// the HTTP Server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production settings.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "daybook_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment (Production Observability)
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Page Discovery (runs exactly once, before the server accepts traffic)
    // Either scan the configured directory or fall back to the built-in page set.
    let discovered = match &config.pages_dir {
        Some(dir) => {
            tracing::info!("Discovering pages in {}", dir.display());
            DirectoryPages::new(dir)
                .pages()
                .expect("FATAL: Failed to scan PAGES_DIR. Check the path and permissions.")
        }
        None => StaticPages::with_defaults()
            .pages()
            .expect("FATAL: Built-in page set unavailable."),
    };
    tracing::info!("Discovered {} page(s)", discovered.len());

    // 5. Route Table Construction
    // Derives names, paths, and the serving order, and synthesizes the home redirect.
    let table = RouteTable::build(discovered);
    for page in table.pages() {
        tracing::debug!(name = %page.name, path = %page.path, "route table entry");
    }
    tracing::info!("Home redirects to {}", table.home().target);

    // 6. Upstream Client & Unified State Assembly
    // One shared client instance owns the connection pool and default headers.
    let client = ApiClient::new(&config.api_base_url)
        .expect("FATAL: Failed to build the upstream client. Check API_BASE_URL.");
    let users = Arc::new(client) as UserApiState;

    let app_state = AppState {
        users,
        config: config.clone(),
    };

    // 7. Router and Server Startup
    let app = create_router(app_state, &table);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: Failed to bind listener. Check BIND_ADDR.");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.unwrap();
}
