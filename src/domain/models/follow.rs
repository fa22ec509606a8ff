use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Directed edge: the follower can see the followee's shared calendar.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Follow {
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: String, followee_id: String) -> Self {
        Self {
            follower_id,
            followee_id,
            created_at: Utc::now(),
        }
    }
}
