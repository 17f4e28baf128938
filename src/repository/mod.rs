//! Bookmark persistence.
//!
//! [`BookmarkRepository`] is the only way handlers reach stored bookmarks. Two
//! implementations exist and exactly one is chosen at startup by [`open`]:
//!
//! - [`MemoryRepository`]: an id-ordered map behind one mutex, nothing survives a restart
//! - [`SqlRepository`]: the `bookmarks` table in a libsql database
//!
//! Every operation is a single critical section or a single SQL statement.

mod memory;
mod sql;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, Storage};
use crate::db::Database;
use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

pub use memory::MemoryRepository;
pub use sql::SqlRepository;

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Every stored bookmark, in no guaranteed order.
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError>;

    /// `Ok(None)` when no bookmark has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError>;

    /// Stores a bookmark and returns it with its final id.
    ///
    /// A caller-supplied id is kept when it passes [`usable_id`] and no stored
    /// bookmark already uses it, otherwise a fresh one is assigned.
    async fn insert(&self, bookmark: NewBookmark) -> Result<Bookmark, StorageError>;

    /// Removes the bookmark if present. Deleting an unknown id is a no-op.
    async fn delete(&self, id: i64) -> Result<(), StorageError>;

    /// Applies the supplied fields and returns the number of rows affected,
    /// `0` when the id matched nothing.
    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError>;
}

/// Largest id a caller may choose. Ids above it are only ever generated.
pub const MAX_SUPPLIED_ID: i64 = 1 << 53;

/// The caller-supplied id if it lies in `1..=MAX_SUPPLIED_ID`, else `None`.
pub fn usable_id(requested: Option<i64>) -> Option<i64> {
    requested.filter(|id| (1..=MAX_SUPPLIED_ID).contains(id))
}

pub async fn open(storage: &Storage, data_dir: &Path) -> anyhow::Result<Arc<dyn BookmarkRepository>> {
    match storage.backend {
        Backend::Memory => {
            tracing::info!("[repository] using in-memory bookmark store");
            Ok(Arc::new(MemoryRepository::new()))
        }
        Backend::Libsql => {
            tracing::info!("[repository] using libsql bookmark store");
            let db = Database::new(storage, data_dir).await?;
            Ok(Arc::new(SqlRepository::new(db)))
        }
    }
}
