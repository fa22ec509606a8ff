pub mod auth;
pub mod calendar;
pub mod category;
pub mod event;
pub mod follow;
pub mod health;
pub mod ics;
pub mod period;
pub mod profile;
pub mod share;
