pub mod auth;
pub mod category;
pub mod event;
pub mod follow;
pub mod period;
pub mod share;
pub mod user;
