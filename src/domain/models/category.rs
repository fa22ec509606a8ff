use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User-defined grouping for events and periods. Private categories hide
/// their entries from followers and share feeds.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(user_id: String, name: String, color: String, is_private: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            color,
            is_private,
            created_at: Utc::now(),
        }
    }
}
