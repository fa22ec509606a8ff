use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A weekly recurring block, e.g. "Gym, Tuesdays 18:00-19:30".
///
/// Times are wall-clock strings in the owner's timezone, so a period keeps
/// its local slot across DST changes. `weekday` is 0 = Monday .. 6 = Sunday.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Period {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub category_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
