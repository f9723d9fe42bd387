//! fileproc - File Processor service
//!
//! HTTP-fronted file intake: uploads land in ./uploads, a background loop
//! records each file in SQLite and moves it to ./processed.

use anyhow::Result;
use tracing::{error, info};

use fileproc::{build_router, db, processor, AppState};
use fileproc_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting File Processor (fileproc) v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Fixed-constant configuration, owned here and passed by reference to
    // every component that needs it
    let config = Config::default();
    info!("Database path: {}", config.database_path.display());

    let pool = match db::init_database_pool(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool, config);

    // The processing loop starts once at startup and runs for the process
    // lifetime
    let loop_state = state.clone();
    tokio::spawn(async move {
        processor::run(loop_state.db, loop_state.config).await;
    });

    let bind_addr = state.config.bind_addr.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("fileproc listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    // Serve on a background task; the foreground waits for interrupt so a
    // clean Ctrl-C exits 0
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Server stopped.");

    Ok(())
}
