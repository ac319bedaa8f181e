//! Song persistence.
//!
//! Handlers only see the [`SongStore`] trait. [`SqliteStorage`] is the production
//! backend; [`MemoryStorage`] keeps the same sentinel semantics in process and is
//! used to exercise the HTTP layer without a database.

use async_trait::async_trait;

use crate::types::{Song, SongFields, SongFilter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// The closed set of failures a storage operation can report.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No row matched the given key.
    #[error("song not found")]
    NotFound,
    /// The title is already taken by another song.
    #[error("song already exists")]
    AlreadyExists,
    /// Any other persistence failure (connection loss, bad SQL, decode error).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Row offset for a 1-based page.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page - 1).max(0).saturating_mul(page_size)
}

#[async_trait]
pub trait SongStore: Send + Sync {
    /// Inserts a new song and returns its assigned id.
    async fn save_song(&self, fields: &SongFields) -> StorageResult<i64>;

    /// Songs with the given id, limited to one page. Empty when nothing matches.
    ///
    /// `page` and `page_size` must be positive; callers validate them.
    async fn get_song_with_pagination(&self, id: i64, page: i64, page_size: i64) -> StorageResult<Vec<Song>>;

    /// Songs matching `filter`, ordered by id, limited to one page.
    async fn list_songs(&self, filter: &SongFilter, page: i64, page_size: i64) -> StorageResult<Vec<Song>>;

    /// Deletes the song with this title and returns the title.
    async fn delete_song(&self, title: &str) -> StorageResult<String>;

    /// Replaces every field of song `id` and returns the (possibly new) title.
    async fn update_song(&self, id: i64, fields: &SongFields) -> StorageResult<String>;

    /// Cheap connectivity check used by the readiness probe.
    async fn ping(&self) -> StorageResult<()>;
}
