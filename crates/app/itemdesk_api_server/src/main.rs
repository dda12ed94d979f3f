//! Itemdesk API server binary.
//!
//! Connects to PostgreSQL (or an in-memory store with `--memory`), runs
//! migrations, seeds the default user and serves the HTTP API until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use itemdesk_api::AppState;
use itemdesk_api::config::ApiConfig;
use itemdesk_core::store::{MemoryStore, PgStore, Store};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "itemdesk_api_server", about = "Itemdesk API server", version)]
struct Args {
    /// Port to listen on. Overrides the port part of `BIND_ADDR`.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection URL. Defaults to `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep users and items in memory instead of PostgreSQL.
    ///
    /// Nothing survives a restart.
    #[arg(long, default_value_t = false)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,itemdesk_api=debug,itemdesk_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(url) = args.database_url {
        config.database_url = url;
    }
    if let Some(port) = args.port {
        let host = config
            .bind_addr
            .rsplit_once(':')
            .map_or("0.0.0.0", |(host, _)| host);
        config.bind_addr = format!("{host}:{port}");
    }
    info!(?config, memory = args.memory, "starting itemdesk_api_server");

    let store: Arc<dyn Store> = if args.memory {
        warn!("using in-memory store, data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        info!(max_connections = args.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;

        info!("running database migrations");
        itemdesk_core::migrate::migrate(&pool).await?;
        Arc::new(PgStore::new(pool))
    };

    let state = AppState::new(config, store)?;
    state.seed().await?;

    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    let app = itemdesk_api::router(state);

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
