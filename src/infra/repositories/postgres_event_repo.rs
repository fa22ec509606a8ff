use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, user_id, title, description, location, starts_at, ends_at, category_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
            .bind(&event.id)
            .bind(&event.user_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.starts_at)
            .bind(event.ends_at)
            .bind(&event.category_id)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE user_id = $1 ORDER BY starts_at ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_range(&self, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>, AppError> {
        // Overlap semantics: anything touching [start, end).
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE user_id = $1 AND starts_at < $2 AND ends_at > $3 ORDER BY starts_at ASC",
        )
            .bind(user_id)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=$1, description=$2, location=$3, starts_at=$4, ends_at=$5, category_id=$6
             WHERE id=$7 AND user_id=$8
             RETURNING *",
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.starts_at)
            .bind(event.ends_at)
            .bind(&event.category_id)
            .bind(&event.id)
            .bind(&event.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
