//! Campus Portal API
//!
//! Serves the faculty access request workflow: students request elevated
//! access, the configured super admin reviews, and approved users gain
//! the `admin` role.

mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Extension, Router};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use campus_api_requests::{requests_router, RequestsState};
use campus_auth::{jwt_auth_middleware, JwtSecret};
use campus_db::{run_migrations, DbPool};
use campus_requests::{
    InMemoryRateLimiter, PgRequestStore, PgUserStore, RateLimit, RequestWorkflowService,
};

use config::Config;
use health::health_handler;
use openapi::swagger_routes;

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set variables directly.
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        reviewer_configured = config.super_admin_email.is_some(),
        "Starting campus portal API"
    );

    if config.super_admin_email.is_none() {
        tracing::warn!(
            "SUPER_ADMIN_EMAIL is not set; all reviewer operations will be denied"
        );
    }

    let pool = match DbPool::connect(&config.database_url).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }
    info!("Database migrations applied");

    let users = Arc::new(PgUserStore::new(pool.inner().clone()));
    let requests = Arc::new(PgRequestStore::new(pool.inner().clone()));
    let service = Arc::new(RequestWorkflowService::new(
        users,
        requests,
        config.reviewer_authority(),
    ));

    let limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));

    // Periodic sweep keeps the limiter's per-user entries from piling up.
    {
        let cleanup_limiter = limiter.clone();
        tokio::spawn(async move {
            let interval = Duration::from_secs(5 * 60);
            loop {
                tokio::time::sleep(interval).await;
                cleanup_limiter.cleanup();
            }
        });
    }

    let rate_limiter: Arc<dyn RateLimit> = limiter;
    let state = RequestsState::new(service, rate_limiter);

    let protected = requests_router(state)
        .layer(middleware::from_fn(jwt_auth_middleware))
        .layer(Extension(JwtSecret(config.jwt_secret.clone())));

    let app = Router::new()
        .route("/health", get(health_handler).with_state(pool.inner().clone()))
        .merge(swagger_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
