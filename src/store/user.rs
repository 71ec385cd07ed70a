//! # User Directory
//!
//! Chat users, created lazily on their first message.

use sqlx::SqlitePool;
use tracing::info;

use super::now;
use crate::error::{StoreError, StoreResult};
use crate::model::{NewUser, User};

const USER_COLUMNS: &str = "id, chat_id, username, full_name, created_at, updated_at";

/// User records backed by SQLite.
#[derive(Clone)]
pub struct UserDirectory {
    pool: SqlitePool,
}

impl UserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_exists_by_chat_id(&self, chat_id: i64) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 1)
    }

    pub async fn get_by_chat_id(&self, chat_id: i64) -> StoreResult<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE chat_id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound("user"))
    }

    /// Insert `user` unless its chat id is already known, returning the stored record.
    ///
    /// First messages from the same chat may race; all of them get the one row.
    pub async fn create(&self, user: &NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (chat_id, username, full_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(chat_id) DO NOTHING
             RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.chat_id)
            .bind(&user.username)
            .bind(&user.full_name)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?;
        match created {
            Some(created) => {
                info!(chat_id = created.chat_id, user_id = created.id, "User created");
                Ok(created)
            }
            None => self.get_by_chat_id(user.chat_id).await,
        }
    }
}
