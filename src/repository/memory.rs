use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BookmarkRepository, usable_id};
use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

#[derive(Debug)]
struct Store {
    rows: BTreeMap<i64, Bookmark>,
    // always greater than every id ever stored, so deleted ids are not reused
    next_id: i64,
}

#[derive(Debug)]
pub struct MemoryRepository {
    store: Mutex<Store>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository {
            store: Mutex::new(Store {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Store {
    fn assign_id(&mut self, requested: Option<i64>) -> Result<i64, StorageError> {
        let id = match usable_id(requested) {
            Some(id) if !self.rows.contains_key(&id) => id,
            _ => self.next_id,
        };
        if id >= self.next_id {
            self.next_id = id.checked_add(1).ok_or(StorageError::IdsExhausted)?;
        }
        Ok(id)
    }
}

#[async_trait]
impl BookmarkRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        let store = self.store.lock().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError> {
        let store = self.store.lock().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn insert(&self, input: NewBookmark) -> Result<Bookmark, StorageError> {
        let mut store = self.store.lock().await;
        let id = store.assign_id(input.id)?;

        let bookmark = Bookmark {
            id,
            title: input.title,
            url: input.url,
            rating: input.rating,
            description: input.description,
        };
        store.rows.insert(id, bookmark.clone());
        Ok(bookmark)
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let mut store = self.store.lock().await;
        store.rows.remove(&id);
        Ok(())
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError> {
        let mut store = self.store.lock().await;
        match store.rows.get_mut(&id) {
            Some(bookmark) => {
                patch.apply(bookmark);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
