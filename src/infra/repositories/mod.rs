pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_event_repo;
pub mod sqlite_period_repo;
pub mod sqlite_category_repo;
pub mod sqlite_follow_repo;
pub mod sqlite_share_repo;

pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_event_repo;
pub mod postgres_period_repo;
pub mod postgres_category_repo;
pub mod postgres_follow_repo;
pub mod postgres_share_repo;
