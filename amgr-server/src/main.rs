//! amgr-server - artist management REST backend
//!
//! Serves CRUD endpoints for artists, albums, concerts and contracts plus
//! dashboard statistics over a single SQLite store.

use std::path::PathBuf;

use amgr_common::config::{self, ConfigOverrides, Settings};
use amgr_common::db::{dashboard, init_database};
use amgr_server::{build_router, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for amgr-server
#[derive(Parser, Debug)]
#[command(name = "amgr-server")]
#[command(about = "Artist management REST backend")]
#[command(version)]
struct Args {
    /// TOML config file (defaults to the platform config folder)
    #[arg(short, long, env = "AMGR_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "AMGR_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "AMGR_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Maximum pooled database connections
    #[arg(long, env = "AMGR_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// Seconds a request waits for a pooled connection
    #[arg(long, env = "AMGR_ACQUIRE_TIMEOUT")]
    acquire_timeout: Option<u64>,

    /// Directory of frontend files served for non-API paths
    #[arg(long, env = "AMGR_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Verify the store, print row counts and exit
    #[arg(long)]
    check: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            database_path: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
            max_connections: self.max_connections,
            acquire_timeout_secs: self.acquire_timeout,
            static_dir: self.static_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(config::default_config_path);
    let file_config = match &config_path {
        Some(path) => config::load_toml_config(path)?,
        None => Default::default(),
    };
    let settings = Settings::resolve(args.overrides(), file_config)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting artist manager (amgr-server) v{}",
        env!("CARGO_PKG_VERSION")
    );
    match &config_path {
        Some(path) if path.exists() => info!("Loaded config from {}", path.display()),
        Some(path) => info!("No config file at {}, using defaults", path.display()),
        None => warn!("No config directory available, using defaults"),
    }
    info!("Database path: {}", settings.database_path.display());

    let pool = match init_database(&settings.database_path, settings.pool).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e).context("Failed to open database");
        }
    };

    if args.check {
        let mut conn = pool.acquire().await.context("Failed to acquire connection")?;
        let counts = dashboard::entity_counts(&mut conn).await?;
        println!(
            "Database OK: {} artists, {} albums, {} concerts",
            counts.artists, counts.albums, counts.concerts
        );
        drop(conn);
        pool.close().await;
        return Ok(());
    }

    let mut app = build_router(AppState::new(pool.clone()));
    if let Some(dir) = &settings.static_dir {
        info!("Serving frontend from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("amgr-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
