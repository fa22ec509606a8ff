use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

/// A share link for a user's calendar. The token grants read access to the
/// public ICS feed without authentication until the share is deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Share {
    pub id: String,
    pub user_id: String,
    pub label: Option<String>,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Share {
    pub fn new(user_id: String, label: Option<String>) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            label,
            token,
            created_at: Utc::now(),
        }
    }
}
