//! Community Demo Server
//!
//! CRUD API over posts and comments backed by SQLite, plus a raw catalog
//! query endpoint and an interop bridge that hands requests to a business
//! service.
//!
//! The database is dropped, recreated and reseeded on every start.

mod config;
mod error;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::get,
    Router,
};
use community_core::ports::{CatalogStore, CommentStore, PostStore};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;
use crate::services::{BusinessService, Director, EchoOperation, HttpForwardOperation};
use crate::storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub interop: Arc<BusinessService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, interop: BusinessService) -> Self {
        Self {
            posts: db.clone(),
            comments: db.clone(),
            catalog: db,
            interop: Arc::new(interop),
        }
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Community Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.validate().context("Invalid configuration")?;
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_url
    );

    let db = Arc::new(
        Database::new(&config.database_url, config.max_connections)
            .await
            .context("Failed to initialize database")?,
    );

    warn!(
        "Dropping and reseeding all tables in {} (demo behaviour, not for production data)",
        config.database_url
    );
    db.initialize()
        .await
        .context("Failed to reset and seed database")?;

    let interop = build_interop(&config);
    info!("Interop business service targets '{}'", interop.target());

    let app = app(AppState::new(db, interop));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_interop(config: &Config) -> BusinessService {
    let director = Arc::new(Director::new());

    match &config.interop_target_url {
        Some(url) => {
            info!("Interop operation forwards to {}", url);
            director.register_operation(
                config.interop_target.clone(),
                Arc::new(HttpForwardOperation::new(url.clone())),
            );
        }
        None => {
            info!("Interop operation echoes requests (no target URL configured)");
            director.register_operation(config.interop_target.clone(), Arc::new(EchoOperation));
        }
    }

    director.create_business_service(config.interop_target.clone())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/iris", get(handlers::catalog::query))
        .route(
            "/interop",
            get(handlers::interop::forward)
                .post(handlers::interop::forward)
                .put(handlers::interop::forward)
                .delete(handlers::interop::forward),
        )
        .merge(api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::posts::list).post(handlers::posts::create),
        )
        .route(
            "/posts/:id",
            get(handlers::posts::get)
                .put(handlers::posts::update)
                .delete(handlers::posts::delete),
        )
        .route("/posts/:id/comments", get(handlers::posts::comments))
        .route(
            "/comments",
            get(handlers::comments::list).post(handlers::comments::create),
        )
        .route(
            "/comments/:id",
            get(handlers::comments::get)
                .put(handlers::comments::update)
                .delete(handlers::comments::delete),
        )
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, starting shutdown");
        }
    }
}
