pub mod auth_service;
pub mod ics;
pub mod schedule;
pub mod visibility;
