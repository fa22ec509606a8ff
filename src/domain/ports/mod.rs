use crate::domain::models::{
    user::User, event::Event, period::Period, category::Category,
    follow::Follow, share::Share, auth::RefreshTokenRecord,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Event>, AppError>;
    async fn list_by_range(&self, user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PeriodRepository: Send + Sync {
    async fn create(&self, period: &Period) -> Result<Period, AppError>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Period>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Period>, AppError>;
    async fn update(&self, period: &Period) -> Result<Period, AppError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<Category, AppError>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> Result<Option<Category>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>, AppError>;
    async fn update(&self, category: &Category) -> Result<Category, AppError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn create(&self, follow: &Follow) -> Result<(), AppError>;
    async fn exists(&self, follower_id: &str, followee_id: &str) -> Result<bool, AppError>;
    async fn list_following(&self, follower_id: &str) -> Result<Vec<User>, AppError>;
    async fn list_followers(&self, followee_id: &str) -> Result<Vec<User>, AppError>;
    async fn delete(&self, follower_id: &str, followee_id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn create(&self, share: &Share) -> Result<Share, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Share>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Share>, AppError>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError>;
}
