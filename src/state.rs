use std::sync::Arc;
use crate::domain::ports::{
    UserRepository, AuthRepository, EventRepository, PeriodRepository,
    CategoryRepository, FollowRepository, ShareRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub period_repo: Arc<dyn PeriodRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub follow_repo: Arc<dyn FollowRepository>,
    pub share_repo: Arc<dyn ShareRepository>,
    pub auth_service: Arc<AuthService>,
}
