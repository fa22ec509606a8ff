use crate::domain::{models::share::Share, ports::ShareRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteShareRepo { pool: SqlitePool }
impl SqliteShareRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl ShareRepository for SqliteShareRepo {
    async fn create(&self, share: &Share) -> Result<Share, AppError> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (id, user_id, label, token, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&share.id)
            .bind(&share.user_id)
            .bind(&share.label)
            .bind(&share.token)
            .bind(share.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Share>, AppError> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Share>, AppError> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE user_id = ? ORDER BY created_at ASC")
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM shares WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Share not found".into()));
        }
        Ok(())
    }
}
