use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{page_offset, SongStore, StorageError, StorageResult};
use crate::types::{Song, SongFields, SongFilter};

const SELECT_SONG: &str = "SELECT id, song, nameGroup, text, release_date, link FROM songs";

/// [`SongStore`] backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Wraps a pool whose schema was already created with [`crate::db::init_db`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Maps driver errors onto the storage sentinels.
fn classify(err: sqlx::Error) -> StorageError {
    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => StorageError::AlreadyExists,
        other => StorageError::Database(other),
    }
}

#[async_trait]
impl SongStore for SqliteStorage {
    async fn save_song(&self, fields: &SongFields) -> StorageResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO songs (song, nameGroup, text, release_date, link)
               VALUES (?1, ?2, ?3, ?4, ?5)
               RETURNING id"#,
        )
        .bind(&fields.song)
        .bind(&fields.group)
        .bind(&fields.text)
        .bind(fields.release_date)
        .bind(&fields.link)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)?;
        Ok(id)
    }

    async fn get_song_with_pagination(&self, id: i64, page: i64, page_size: i64) -> StorageResult<Vec<Song>> {
        let songs = sqlx::query_as::<_, Song>(&format!("{SELECT_SONG} WHERE id = ?1 LIMIT ?2 OFFSET ?3"))
            .bind(id)
            .bind(page_size)
            .bind(page_offset(page, page_size))
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        Ok(songs)
    }

    async fn list_songs(&self, filter: &SongFilter, page: i64, page_size: i64) -> StorageResult<Vec<Song>> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_SONG);
        qb.push(" WHERE 1=1");
        if let Some(group) = &filter.group {
            qb.push(" AND nameGroup = ").push_bind(group.clone());
        }
        if let Some(title) = &filter.song {
            qb.push(" AND song = ").push_bind(title.clone());
        }
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(page_offset(page, page_size));

        let songs = qb.build_query_as::<Song>().fetch_all(&self.pool).await.map_err(classify)?;
        Ok(songs)
    }

    async fn delete_song(&self, title: &str) -> StorageResult<String> {
        let res = sqlx::query("DELETE FROM songs WHERE song = ?1")
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(title.to_string())
    }

    async fn update_song(&self, id: i64, fields: &SongFields) -> StorageResult<String> {
        // Single conditional statement: existence check and write cannot interleave
        // with a concurrent delete.
        let res = sqlx::query(
            r#"UPDATE songs
               SET song = ?2, nameGroup = ?3, text = ?4, release_date = ?5, link = ?6
               WHERE id = ?1"#,
        )
        .bind(id)
        .bind(&fields.song)
        .bind(&fields.group)
        .bind(&fields.text)
        .bind(fields.release_date)
        .bind(&fields.link)
        .execute(&self.pool)
        .await
        .map_err(classify)?;
        if res.rows_affected() == 0 {
            tracing::debug!(id, "update matched no rows");
            return Err(StorageError::NotFound);
        }
        Ok(fields.song.clone())
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
