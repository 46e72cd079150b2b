use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the application's entire configuration state. The struct is immutable
/// once loaded, ensuring consistency across all requests and services, and is
/// pulled into the application state via FromRef as part of the Unified State
/// Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Socket address the portal listens on.
    pub bind_addr: String,
    // Base URL of the upstream user service, including any path prefix.
    pub api_base_url: String,
    // Directory scanned for day pages at startup. When unset, the built-in
    // static page set is served instead.
    pub pages_dir: Option<PathBuf>,
    // Runtime environment marker. Controls log formatting and required settings.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, built-in pages, default upstream URL) and the stricter
/// production posture (JSON logs, everything configured explicitly).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test
    /// setup. This allows us to instantiate the configuration without needing to
    /// set environment variables for lightweight test state scaffolding.
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            api_base_url: "http://localhost:3000/api".to_string(),
            pages_dir: None,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at
    /// startup. It reads all parameters from environment variables and
    /// implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a setting required for the current runtime environment
    /// (especially Production) is not found. This prevents the application from
    /// starting with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // Bind Address Resolution
        // Both environments accept an override; the default suits containers
        // and local runs alike.
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                bind_addr,
                // The local default matches the conventional dev setup of the
                // upstream user service.
                api_base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
                // No pages directory means the built-in page set is used.
                pages_dir: env::var("PAGES_DIR").ok().map(PathBuf::from),
            },
            Env::Production => Self {
                env: Env::Production,
                bind_addr,
                // Production demands an explicit upstream; a silently assumed
                // localhost URL would only fail later and less clearly.
                api_base_url: env::var("API_BASE_URL")
                    .expect("FATAL: API_BASE_URL required in production"),
                pages_dir: Some(PathBuf::from(
                    env::var("PAGES_DIR").expect("FATAL: PAGES_DIR required in production"),
                )),
            },
        }
    }
}
