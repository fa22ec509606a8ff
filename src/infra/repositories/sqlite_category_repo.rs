use crate::domain::{models::category::Category, ports::CategoryRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCategoryRepo {
    pool: SqlitePool,
}

impl SqliteCategoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepo {
    async fn create(&self, category: &Category) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, user_id, name, color, is_private, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
            .bind(&category.id)
            .bind(&category.user_id)
            .bind(&category.name)
            .bind(&category.color)
            .bind(category.is_private)
            .bind(category.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Category>, AppError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE user_id = ? ORDER BY created_at ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name=?, color=?, is_private=? WHERE id=? AND user_id=? RETURNING *",
        )
            .bind(&category.name)
            .bind(&category.color)
            .bind(category.is_private)
            .bind(&category.id)
            .bind(&category.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        // ON DELETE SET NULL detaches events and periods still pointing here.
        let result = sqlx::query("DELETE FROM categories WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".into()));
        }
        Ok(())
    }
}
