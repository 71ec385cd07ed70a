//! # Content Log
//!
//! Contents the vendor accepted for printing.

use sqlx::SqlitePool;

use super::now;
use crate::error::StoreResult;
use crate::model::Content;

#[derive(Clone)]
pub struct ContentLog {
    pool: SqlitePool,
}

impl ContentLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, content_id: i64, memobird_id: &str, is_printed: bool) -> StoreResult<Content> {
        let content = sqlx::query_as::<_, Content>(
            "INSERT INTO contents (content_id, memobird_id, is_printed, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, content_id, memobird_id, is_printed, created_at",
        )
        .bind(content_id)
        .bind(memobird_id)
        .bind(is_printed)
        .bind(now())
        .fetch_one(&self.pool)
        .await?;
        Ok(content)
    }

    /// Contents sent to `memobird_id`, newest first.
    pub async fn list_by_device(&self, memobird_id: &str) -> StoreResult<Vec<Content>> {
        let contents = sqlx::query_as::<_, Content>(
            "SELECT id, content_id, memobird_id, is_printed, created_at
             FROM contents WHERE memobird_id = ? ORDER BY id DESC",
        )
        .bind(memobird_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(contents)
    }
}
