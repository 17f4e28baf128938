use crate::config::Storage;
use anyhow::Result;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA: &str = include_str!("migrations/001_bookmarks.sql");

pub const IN_MEMORY: &str = ":memory:";

/// Owns the libsql database and the one connection every query goes through.
/// Opened once at startup, dropped at shutdown.
pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn resolve_path(database: &str, data_dir: &Path) -> PathBuf {
        if database == IN_MEMORY {
            PathBuf::from(IN_MEMORY)
        } else {
            data_dir.join(database)
        }
    }

    pub async fn new(storage: &Storage, data_dir: &Path) -> Result<Self> {
        let path = Self::resolve_path(&storage.database, data_dir);

        let db = match (&storage.turso_url, &storage.turso_auth_token) {
            (Some(url), Some(token)) => {
                tracing::info!("[db] running in synced database mode (offline writes)");
                let sync_interval = Duration::from_secs(storage.sync_interval_seconds);
                Builder::new_synced_database(&path, url.clone(), token.clone())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            _ => {
                tracing::info!(path = ?path, "[db] running in local mode");
                Builder::new_local(&path).build().await?
            }
        };

        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create bookmarks table: {e}"))?;

        Ok(Database { _db: db, conn })
    }

    pub async fn open_in_memory() -> Result<Self> {
        Self::new(
            &Storage {
                database: IN_MEMORY.to_string(),
                ..Storage::default()
            },
            Path::new("."),
        )
        .await
    }
}
