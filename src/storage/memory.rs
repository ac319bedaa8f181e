use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{page_offset, SongStore, StorageError, StorageResult};
use crate::types::{Song, SongFields, SongFilter};

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Song>,
}

/// In-process [`SongStore`] with the same uniqueness and not-found rules as SQLite.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn paginate<'a>(rows: impl Iterator<Item = &'a Song>, page: i64, page_size: i64) -> Vec<Song> {
    let skip = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(0);
    rows.skip(skip).take(take).cloned().collect()
}

#[async_trait]
impl SongStore for MemoryStorage {
    async fn save_song(&self, fields: &SongFields) -> StorageResult<i64> {
        let mut inner = self.inner.write().await;
        if inner.rows.values().any(|s| s.song == fields.song) {
            return Err(StorageError::AlreadyExists);
        }
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, fields.clone().into_song(id));
        Ok(id)
    }

    async fn get_song_with_pagination(&self, id: i64, page: i64, page_size: i64) -> StorageResult<Vec<Song>> {
        let inner = self.inner.read().await;
        Ok(paginate(inner.rows.get(&id).into_iter(), page, page_size))
    }

    async fn list_songs(&self, filter: &SongFilter, page: i64, page_size: i64) -> StorageResult<Vec<Song>> {
        let inner = self.inner.read().await;
        Ok(paginate(inner.rows.values().filter(|s| filter.matches(s)), page, page_size))
    }

    async fn delete_song(&self, title: &str) -> StorageResult<String> {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|_, s| s.song != title);
        if inner.rows.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(title.to_string())
    }

    async fn update_song(&self, id: i64, fields: &SongFields) -> StorageResult<String> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&id) {
            return Err(StorageError::NotFound);
        }
        if inner.rows.values().any(|s| s.id != id && s.song == fields.song) {
            return Err(StorageError::AlreadyExists);
        }
        inner.rows.insert(id, fields.clone().into_song(id));
        Ok(fields.song.clone())
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
