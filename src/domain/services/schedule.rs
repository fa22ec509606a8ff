use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::models::{event::Event, period::Period};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First UTC instant of the local day `date` in `tz`.
///
/// Midnight can be skipped by a DST jump, in which case the day starts at
/// the first wall-clock hour that exists.
pub fn day_start_utc(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    for hour in 0..=3 {
        let Some(naive) = date.and_hms_opt(hour, 0, 0) else { continue };
        if let Some(resolved) = tz.from_local_datetime(&naive).earliest() {
            return resolved.with_timezone(&Utc);
        }
    }
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Buckets events into the seven days of the week starting at `start`
/// (a Monday), by the local date of their start instant in `tz`.
///
/// Events outside the week are dropped. Each bucket is ordered by start
/// instant, then title, then id, so renderings are stable.
pub fn events_by_day(events: &[Event], start: NaiveDate, tz: Tz) -> [Vec<Event>; 7] {
    let mut days: [Vec<Event>; 7] = Default::default();

    for event in events {
        let local_date = event.starts_at.with_timezone(&tz).date_naive();
        let offset = (local_date - start).num_days();
        if (0..7).contains(&offset) {
            days[offset as usize].push(event.clone());
        }
    }

    for day in days.iter_mut() {
        day.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    days
}

/// Buckets periods by weekday, 0 = Monday .. 6 = Sunday, ordered within
/// each day by start time, then name, then id.
///
/// Periods with an out-of-range weekday are dropped; a start time that no
/// longer parses sorts after all parseable ones instead of failing.
pub fn periods_by_day(periods: &[Period]) -> [Vec<Period>; 7] {
    let mut days: [Vec<Period>; 7] = Default::default();

    for period in periods {
        if (0..7).contains(&period.weekday) {
            days[period.weekday as usize].push(period.clone());
        }
    }

    for day in days.iter_mut() {
        day.sort_by(compare_periods);
    }

    days
}

/// Parses a "HH:MM" wall-clock string.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn compare_periods(a: &Period, b: &Period) -> Ordering {
    let by_start = match (parse_clock(&a.start_time), parse_clock(&b.start_time)) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_start
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
