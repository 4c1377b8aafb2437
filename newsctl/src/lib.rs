//! # newsctl: news items with ordered category lists
//!
//! `newsctl` is a small HTTP backend for news items. Each item has a title, a
//! body and an ordered list of integer category ids. Clients create items,
//! edit them partially, and page through them with their categories attached.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! uses PostgreSQL through SQLx for persistence.
//!
//! ### Request Flow
//!
//! A request to `/api/v1/news/*` first passes the bearer-token middleware in [`auth`]. The
//! handler in [`api`] validates the payload and calls the [`services::NewsService`], which runs
//! the workflow against the repositories in [`db::handlers`]. Writes that touch both the news row
//! and its category links run inside a single transaction through
//! [`db::transaction::TxManager::run_in_scope`], so a failure part way leaves nothing behind.
//! Storage outcomes (missing row, duplicate link) are translated into domain errors by the service
//! and into HTTP statuses by [`errors::Error`].
//!
//! ### Core Components
//!
//! - **API layer** ([`api`]): handlers and request/response models, documented with `utoipa`
//! - **Authentication** ([`auth`]): HS256 session tokens issued by `/authorize`
//! - **Services** ([`services`]): transactional workflows and domain errors
//! - **Database layer** ([`db`]): the executor capability, transactions, repositories
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use newsctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = newsctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize structured logging
//!     newsctl::telemetry::init_telemetry(&config.log)?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! newsctl::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod services;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use anyhow::Context as _;
use axum::{
    Json, Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, instrument, warn};
use utoipa::OpenApi;

use crate::{
    auth::middleware::require_session_middleware,
    db::transaction::TxManager,
    openapi::ApiDoc,
    services::NewsService,
};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .news(NewsService::new(TxManager::new(pool)))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub news: NewsService,
}

/// Get the newsctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect to PostgreSQL, retrying while the server comes up
#[instrument(skip_all, err)]
async fn connect_with_retry(config: &config::DatabaseConfig) -> anyhow::Result<PgPool> {
    let mut attempt = 1;
    loop {
        match config.pool.to_pool_options().connect(&config.url).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < config.connect_attempts => {
                warn!(
                    "Database connection attempt {}/{} failed: {}. Retrying in {}",
                    attempt,
                    config.connect_attempts,
                    e,
                    humantime::format_duration(config.connect_retry_delay)
                );
                tokio::time::sleep(config.connect_retry_delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("connect to database after {attempt} attempts"));
            }
        }
    }
}

/// Setup the database pool and run migrations
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = connect_with_retry(&config.database).await?;
    migrator().run(&pool).await.context("run database migrations")?;
    info!("Database ready (max {} connections)", config.database.pool.max_connections);
    Ok(pool)
}

/// Build the application router.
///
/// - `GET /ping`: liveness
/// - `GET /authorize`: issue a session token
/// - `GET /api-docs/openapi.json`: OpenAPI document
/// - `/api/v1/news/*`: news API, bearer token required
pub fn build_router(state: &AppState) -> Router {
    let news_routes = Router::new()
        .route("/news/create", post(api::handlers::news::create_news))
        .route("/news/edit/{id}", post(api::handlers::news::update_news))
        .route("/news/list", get(api::handlers::news::list_news))
        .route("/news/{id}", get(api::handlers::news::get_news))
        .route_layer(from_fn_with_state(state.clone(), require_session_middleware));

    Router::new()
        .route("/ping", get(|| async { StatusCode::OK }))
        .route("/authorize", get(api::handlers::auth::authorize))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", news_routes)
        .with_state(state.clone())
        // Add tracing layer
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
}

/// Main application struct that owns the router and the database pool.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database and runs migrations
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown future resolves, in-flight requests finish and the pool is closed
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = setup_database(&config).await?;
        Ok(Self::new_with_pool(config, pool))
    }

    /// Create an application on an existing, already migrated pool
    pub fn new_with_pool(config: Config, pool: PgPool) -> Self {
        let app_state = AppState::builder()
            .config(config.clone())
            .news(NewsService::new(TxManager::new(pool.clone())))
            .build();

        let router = build_router(&app_state);

        Self { router, config, pool }
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "newsctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
