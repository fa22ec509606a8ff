use crate::domain::{models::period::Period, ports::PeriodRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPeriodRepo {
    pool: PgPool,
}

impl PostgresPeriodRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodRepository for PostgresPeriodRepo {
    async fn create(&self, period: &Period) -> Result<Period, AppError> {
        sqlx::query_as::<_, Period>(
            "INSERT INTO periods (id, user_id, name, weekday, start_time, end_time, category_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
            .bind(&period.id)
            .bind(&period.user_id)
            .bind(&period.name)
            .bind(period.weekday)
            .bind(&period.start_time)
            .bind(&period.end_time)
            .bind(&period.category_id)
            .bind(period.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Period>, AppError> {
        sqlx::query_as::<_, Period>("SELECT * FROM periods WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Period>, AppError> {
        sqlx::query_as::<_, Period>(
            "SELECT * FROM periods WHERE user_id = $1 ORDER BY weekday ASC, start_time ASC",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, period: &Period) -> Result<Period, AppError> {
        sqlx::query_as::<_, Period>(
            "UPDATE periods SET name=$1, weekday=$2, start_time=$3, end_time=$4, category_id=$5
             WHERE id=$6 AND user_id=$7
             RETURNING *",
        )
            .bind(&period.name)
            .bind(period.weekday)
            .bind(&period.start_time)
            .bind(&period.end_time)
            .bind(&period.category_id)
            .bind(&period.id)
            .bind(&period.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM periods WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Period not found".into()));
        }
        Ok(())
    }
}
