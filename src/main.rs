use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use songbook::{config, db, logging, state::AppState, storage::SqliteStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (embedded defaults -> songbook.toml -> env/.env)
    let app_cfg = config::load()?;

    // Guards must outlive the server so buffered log lines get flushed
    let _log_guards = logging::init(&app_cfg.logging)?;
    info!(env = ?app_cfg.logging.env, "starting songbook");
    debug!("debug messages are enabled");

    let pool = db::connect(&app_cfg.database).await?;
    db::init_db(&pool).await?;

    let store = Arc::new(SqliteStorage::new(pool.clone()));
    let state = AppState::new(store, app_cfg.clone());
    let app = songbook::build_router(state);

    let host = &app_cfg.server.host;
    let port = app_cfg.server.port;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Songbook listening on http://{}", listener.local_addr()?);

    // In-flight requests get `shutdown_grace_secs` to finish after a signal
    let grace = Duration::from_secs(app_cfg.server.shutdown_grace_secs);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();
    let deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        res = server => res?,
        _ = deadline => warn!("grace period of {:?} elapsed, abandoning in-flight requests", grace),
    }

    pool.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
