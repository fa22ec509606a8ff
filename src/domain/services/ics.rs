use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarDateTime, Component, DatePerhapsTime, Event as IcalEvent, EventLike,
    Property,
};
use icalendar::parser::{read_calendar, unfold};

use crate::domain::models::{event::Event, period::Period};
use crate::domain::services::schedule::parse_clock;
use crate::error::AppError;

/// Host tag appended to UIDs so exported entries stay globally unique.
const UID_HOST: &str = "calshare";

/// Builds the VEVENT for a one-off event. Times are emitted in UTC.
pub fn event_component(event: &Event) -> IcalEvent {
    let mut component = IcalEvent::new();
    component
        .uid(&format!("{}@{}", event.id, UID_HOST))
        .summary(&event.title)
        .starts(event.starts_at)
        .ends(event.ends_at);

    if let Some(ref description) = event.description {
        component.description(description);
    }
    if let Some(ref location) = event.location {
        component.location(location);
    }

    component.done()
}

/// Builds the recurring VEVENT for a weekly period.
///
/// Times are emitted floating (no timezone) so the slot keeps its wall-clock
/// position for whoever imports the feed. DTSTART is anchored at the first
/// occurrence of the period's weekday on or after its creation date.
pub fn period_component(period: &Period) -> IcalEvent {
    let start_clock = parse_clock(&period.start_time).unwrap_or(NaiveTime::MIN);
    let end_clock = parse_clock(&period.end_time).unwrap_or(start_clock);
    let anchor = first_weekday_on_or_after(period.created_at.date_naive(), period.weekday);

    let mut component = IcalEvent::new();
    component
        .uid(&format!("{}@{}", period.id, UID_HOST))
        .summary(&period.name)
        .add_property("DTSTART", format_floating(anchor, start_clock))
        .add_property("DTEND", format_floating(anchor, end_clock))
        .add_property(
            "RRULE",
            format!("FREQ=WEEKLY;BYDAY={}", byday_code(period.weekday)),
        );

    component.done()
}

/// Renders a full calendar document for the given events and periods.
pub fn calendar_ics(name: &str, events: &[Event], periods: &[Period]) -> String {
    let mut calendar = Calendar::new();
    calendar.append_property(Property::new("X-WR-CALNAME", name));

    for event in events {
        calendar.push(event_component(event));
    }
    for period in periods {
        calendar.push(period_component(period));
    }

    calendar.to_string()
}

#[derive(Debug)]
pub struct ImportedEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ImportedPeriod {
    pub name: String,
    pub weekday: i32,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Default)]
pub struct ParsedCalendar {
    pub events: Vec<ImportedEvent>,
    pub periods: Vec<ImportedPeriod>,
    pub skipped: usize,
}

/// Parses an ICS document into importable events and periods.
///
/// Non-recurring VEVENTs become events; FREQ=WEEKLY recurrences become one
/// period per BYDAY entry. Floating and date-valued times are resolved in
/// `tz`, the importing user's timezone. Components the model cannot express
/// (other recurrence rules, missing DTSTART) are counted in `skipped` rather
/// than failing the whole import. A document that does not parse at all is
/// a validation error.
pub fn parse_calendar(content: &str, tz: Tz) -> Result<ParsedCalendar, AppError> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| AppError::Validation(format!("Invalid ICS document: {e}")))?;

    let mut parsed = ParsedCalendar::default();

    for vevent in calendar.components.iter().filter(|c| c.name == "VEVENT") {
        let summary = vevent
            .find_prop("SUMMARY")
            .map(|p| p.val.to_string())
            .unwrap_or_else(|| "(untitled)".to_string());
        let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
        let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

        let Some(start) = vevent
            .find_prop("DTSTART")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
        else {
            parsed.skipped += 1;
            continue;
        };
        let end = vevent
            .find_prop("DTEND")
            .and_then(|p| DatePerhapsTime::try_from(p).ok());

        match vevent.find_prop("RRULE").map(|p| p.val.to_string()) {
            None => match imported_event(summary, description, location, start, end, tz) {
                Some(event) => parsed.events.push(event),
                None => parsed.skipped += 1,
            },
            Some(rule) if is_weekly(&rule) => {
                let periods = imported_periods(&summary, start, end, &rule, tz);
                if periods.is_empty() {
                    parsed.skipped += 1;
                } else {
                    parsed.periods.extend(periods);
                }
            }
            Some(_) => parsed.skipped += 1,
        }
    }

    Ok(parsed)
}

fn imported_event(
    title: String,
    description: Option<String>,
    location: Option<String>,
    start: DatePerhapsTime,
    end: Option<DatePerhapsTime>,
    tz: Tz,
) -> Option<ImportedEvent> {
    // Date-valued entries span the whole local day by default; timed ones
    // default to one hour.
    let (starts_at, default_span) = match start {
        DatePerhapsTime::Date(date) => (
            local_datetime_utc(date.and_time(NaiveTime::MIN), tz)?,
            Duration::days(1),
        ),
        DatePerhapsTime::DateTime(value) => (resolve_utc(value, tz)?, Duration::hours(1)),
    };

    let ends_at = end
        .and_then(|value| match value {
            DatePerhapsTime::Date(date) => local_datetime_utc(date.and_time(NaiveTime::MIN), tz),
            DatePerhapsTime::DateTime(value) => resolve_utc(value, tz),
        })
        .filter(|ends_at| *ends_at > starts_at)
        .unwrap_or(starts_at + default_span);

    Some(ImportedEvent { title, description, location, starts_at, ends_at })
}

fn imported_periods(
    name: &str,
    start: DatePerhapsTime,
    end: Option<DatePerhapsTime>,
    rule: &str,
    tz: Tz,
) -> Vec<ImportedPeriod> {
    // A date-valued weekly start carries no clock to map onto a period.
    let DatePerhapsTime::DateTime(start_value) = start else {
        return Vec::new();
    };
    let Some(local_start) = resolve_local(start_value, tz) else {
        return Vec::new();
    };

    let start_clock = local_start.time();
    let explicit_end = end
        .and_then(|value| match value {
            DatePerhapsTime::DateTime(value) => resolve_local(value, tz).map(|local| local.time()),
            DatePerhapsTime::Date(_) => None,
        })
        .filter(|end_clock| *end_clock > start_clock);

    // A start in the last minute of the day leaves no same-day end at all;
    // such a component cannot map onto a period and is skipped.
    let Some(end_clock) = explicit_end.or_else(|| default_end_clock(start_clock)) else {
        return Vec::new();
    };

    let weekdays = byday_weekdays(rule)
        .unwrap_or_else(|| vec![local_start.weekday().num_days_from_monday() as i32]);

    weekdays
        .into_iter()
        .map(|weekday| ImportedPeriod {
            name: name.to_string(),
            weekday,
            start_time: start_clock.format("%H:%M").to_string(),
            end_time: end_clock.format("%H:%M").to_string(),
        })
        .collect()
}

/// Resolves a calendar datetime to a UTC instant, treating floating times
/// as local to `tz`. Unknown TZIDs fall back to `tz` as well.
fn resolve_utc(value: CalendarDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    match value {
        CalendarDateTime::Utc(instant) => Some(instant),
        CalendarDateTime::Floating(naive) => local_datetime_utc(naive, tz),
        CalendarDateTime::WithTimezone { date_time, tzid } => {
            let source = tzid.parse::<Tz>().unwrap_or(tz);
            local_datetime_utc(date_time, source)
        }
    }
}

/// Resolves a calendar datetime to the wall clock a period should keep.
fn resolve_local(value: CalendarDateTime, tz: Tz) -> Option<NaiveDateTime> {
    match value {
        CalendarDateTime::Utc(instant) => Some(instant.with_timezone(&tz).naive_local()),
        CalendarDateTime::Floating(naive) => Some(naive),
        CalendarDateTime::WithTimezone { date_time, .. } => Some(date_time),
    }
}

fn local_datetime_utc(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    // earliest() picks the first of an ambiguous DST pair; a time skipped
    // by a DST jump resolves one hour later.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|resolved| resolved.with_timezone(&Utc))
}

fn default_end_clock(start: NaiveTime) -> Option<NaiveTime> {
    // NaiveTime arithmetic wraps at midnight; keep the end on the same day.
    let candidate = start + Duration::hours(1);
    if candidate > start {
        return Some(candidate);
    }
    NaiveTime::from_hms_opt(23, 59, 0).filter(|fallback| *fallback > start)
}

fn format_floating(date: NaiveDate, clock: NaiveTime) -> String {
    date.and_time(clock).format("%Y%m%dT%H%M%S").to_string()
}

fn first_weekday_on_or_after(date: NaiveDate, weekday: i32) -> NaiveDate {
    let current = date.weekday().num_days_from_monday() as i32;
    let ahead = (weekday - current).rem_euclid(7);
    date + Duration::days(ahead as i64)
}

fn byday_code(weekday: i32) -> &'static str {
    match weekday {
        0 => "MO",
        1 => "TU",
        2 => "WE",
        3 => "TH",
        4 => "FR",
        5 => "SA",
        _ => "SU",
    }
}

fn is_weekly(rule: &str) -> bool {
    rule_part(rule, "FREQ").is_some_and(|freq| freq.eq_ignore_ascii_case("WEEKLY"))
}

fn rule_part<'a>(rule: &'a str, key: &str) -> Option<&'a str> {
    rule.split(';').find_map(|part| {
        let (k, v) = part.split_once('=')?;
        k.trim().eq_ignore_ascii_case(key).then_some(v.trim())
    })
}

fn byday_weekdays(rule: &str) -> Option<Vec<i32>> {
    let byday = rule_part(rule, "BYDAY")?;
    let days: Vec<i32> = byday
        .split(',')
        .filter_map(|code| weekday_from_code(code.trim()))
        .collect();
    (!days.is_empty()).then_some(days)
}

fn weekday_from_code(code: &str) -> Option<i32> {
    // Ordinal forms like 2MO or -1FR are monthly-style and not mapped.
    match code {
        "MO" => Some(0),
        "TU" => Some(1),
        "WE" => Some(2),
        "TH" => Some(3),
        "FR" => Some(4),
        "SA" => Some(5),
        "SU" => Some(6),
        _ => None,
    }
}
