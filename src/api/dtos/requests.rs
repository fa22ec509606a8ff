use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    /// An empty string clears the field.
    pub description: Option<String>,
    /// An empty string clears the field.
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    /// An empty string detaches the event from its category.
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePeriodRequest {
    pub name: String,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePeriodRequest {
    pub name: Option<String>,
    pub weekday: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// An empty string detaches the period from its category.
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
    pub is_private: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateFollowRequest {
    pub username: String,
}

#[derive(Deserialize)]
pub struct CreateShareRequest {
    pub label: Option<String>,
}
