use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::info;

use crate::config::{ensure_sqlite_parent_dir, DatabaseConfig};

/// Opens (and if needed creates) the SQLite database named in `cfg`.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let db_url = &cfg.url;
    ensure_sqlite_parent_dir(db_url)?;
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!("Creating SQLite database at {}", db_url);
        Sqlite::create_database(db_url).await?;
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                let _ = sqlx::query("PRAGMA busy_timeout=10000;").execute(&mut *conn).await;
                Ok(())
            })
        })
        .connect(db_url)
        .await?;
    Ok(pool)
}

/// Creates the `songs` table and its title index if they do not exist yet.
pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas are best-effort; in-memory databases ignore WAL
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nameGroup TEXT NOT NULL DEFAULT '',
            song TEXT NOT NULL UNIQUE,
            text TEXT NOT NULL DEFAULT '',
            release_date DATE NULL,
            link TEXT NOT NULL DEFAULT ''
        )"#,
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow::anyhow!("failed to create songs table: {}", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_song ON songs(song)")
        .execute(pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create idx_song: {}", e))?;

    tracing::debug!("songs schema ready");
    Ok(())
}
