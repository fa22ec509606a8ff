use crate::domain::{models::{follow::Follow, user::User}, ports::FollowRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteFollowRepo { pool: SqlitePool }
impl SqliteFollowRepo { pub fn new(pool: SqlitePool) -> Self { Self { pool } } }

#[async_trait]
impl FollowRepository for SqliteFollowRepo {
    async fn create(&self, follow: &Follow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)"
        )
            .bind(&follow.follower_id)
            .bind(&follow.followee_id)
            .bind(follow.created_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn exists(&self, follower_id: &str, followee_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM follows WHERE follower_id = ? AND followee_id = ?"
        )
            .bind(follower_id)
            .bind(followee_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count") > 0)
    }

    async fn list_following(&self, follower_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u
             JOIN follows f ON f.followee_id = u.id
             WHERE f.follower_id = ?
             ORDER BY u.username ASC"
        )
            .bind(follower_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_followers(&self, followee_id: &str) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT u.* FROM users u
             JOIN follows f ON f.follower_id = u.id
             WHERE f.followee_id = ?
             ORDER BY u.username ASC"
        )
            .bind(followee_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, follower_id: &str, followee_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool).await.map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Follow not found".into()));
        }
        Ok(())
    }
}
