use async_trait::async_trait;

use super::{BookmarkRepository, usable_id};
use crate::db::Database;
use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};

pub struct SqlRepository {
    db: Database,
}

impl SqlRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark, StorageError> {
        let id: i64 = row.get(0)?;
        let rating: i64 = row.get(3)?;
        let rating = u8::try_from(rating)
            .map_err(|_| StorageError::InvalidRow(format!("bookmark {id} has rating {rating}")))?;

        Ok(Bookmark {
            id,
            title: row.get(1)?,
            url: row.get(2)?,
            rating,
            description: row.get::<Option<String>>(4)?,
        })
    }

    fn optional<T: Into<libsql::Value>>(value: Option<T>) -> libsql::Value {
        value.map_or(libsql::Value::Null, Into::into)
    }
}

#[async_trait]
impl BookmarkRepository for SqlRepository {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        let query = r#"
            SELECT id, title, url, rating, description
            FROM bookmarks
        "#;

        let mut rows = self.db.connection().query(query, ()).await?;
        let mut bookmarks = Vec::new();
        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }
        Ok(bookmarks)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError> {
        let query = r#"
            SELECT id, title, url, rating, description
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.db.connection().query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, input: NewBookmark) -> Result<Bookmark, StorageError> {
        // binding NULL for the id lets AUTOINCREMENT pick a fresh one
        let query = r#"
            INSERT INTO bookmarks (id, title, url, rating, description)
            VALUES (
                CASE
                    WHEN ?1 IS NULL OR EXISTS (SELECT 1 FROM bookmarks WHERE id = ?1) THEN NULL
                    ELSE ?1
                END,
                ?2, ?3, ?4, ?5
            )
            RETURNING id, title, url, rating, description
        "#;

        let params: Vec<libsql::Value> = vec![
            Self::optional(usable_id(input.id)),
            input.title.into(),
            input.url.into(),
            i64::from(input.rating).into(),
            Self::optional(input.description),
        ];

        let mut rows = self.db.connection().query(query, params).await?;

        match rows.next().await? {
            Some(row) => Self::row_to_bookmark(&row),
            None => Err(StorageError::InvalidRow("insert returned no row".to_string())),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(())
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError> {
        if patch.is_empty() {
            let mut rows = self
                .db
                .connection()
                .query("SELECT COUNT(*) FROM bookmarks WHERE id = ?", libsql::params![id])
                .await?;
            let count = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };
            return Ok(count as u64);
        }

        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = patch.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = patch.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(rating) = patch.rating {
            updates.push("rating = ?");
            params.push(i64::from(rating).into());
        }
        if let Some(description) = patch.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        params.push(id.into());

        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));
        let affected = self.db.connection().execute(&query, params).await?;
        Ok(affected)
    }
}
