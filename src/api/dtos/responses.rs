use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::{event::Event, period::Period};

#[derive(Serialize)]
pub struct WeekResponse {
    pub week_start: NaiveDate,
    pub days: Vec<DayView>,
}

#[derive(Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub events: Vec<Event>,
    pub periods: Vec<Period>,
}

#[derive(Serialize)]
pub struct ImportSummary {
    pub events_imported: usize,
    pub periods_imported: usize,
    pub skipped: usize,
}
