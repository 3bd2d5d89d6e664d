//! API Server Entry Point
//!
//! Loads configuration, installs logging, opens the credential store and
//! serves the auth router until SIGINT/SIGTERM.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `sso::AppError`.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::StatusCode};
use clap::Parser;
use platform::password::Argon2Hasher;
use sso::{Auth, JwtTokenIssuer, SqliteCredentialStore, auth_router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Env};

/// SSO identity service
#[derive(Parser, Debug)]
#[command(name = "api", about = "SSO identity service")]
struct Args {
    /// Path to the YAML config file
    #[arg(long = "config", env = "CONFIG_PATH")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file before reading CONFIG_PATH
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    init_tracing(config.env);

    tracing::info!(env = config.env.as_str(), "Starting SSO service");
    tracing::debug!(
        storage_path = %config.storage_path.display(),
        token_ttl_secs = config.token_ttl.as_secs(),
        port = config.http.port,
        "Configuration loaded"
    );

    let store = SqliteCredentialStore::connect(&config.storage_path)
        .await
        .with_context(|| {
            format!(
                "failed to open storage at {}",
                config.storage_path.display()
            )
        })?;

    tracing::info!("Connected to storage");

    let auth_config = config.auth_config();
    let hasher = Argon2Hasher::new(auth_config.work_factor)?;
    let auth = Auth::new(
        Arc::new(store),
        Arc::new(hasher),
        Arc::new(JwtTokenIssuer::new()),
        auth_config.token_ttl,
    );

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.http.timeout,
        ));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(env: Env) {
    let default_filter = match env {
        Env::Local | Env::Dev => "api=debug,sso=debug,tower_http=debug",
        Env::Prod => "api=info,sso=info,tower_http=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        Env::Local => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        Env::Dev | Env::Prod => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Shutting down"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Shutting down"),
    }
}
