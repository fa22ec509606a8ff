use std::collections::HashSet;

use crate::domain::models::{category::Category, event::Event, period::Period};

/// Filters a user's events down to what other people may see: everything
/// except entries in a private category. Uncategorized entries are visible.
pub fn shared_events(events: Vec<Event>, categories: &[Category]) -> Vec<Event> {
    let private = private_ids(categories);
    events
        .into_iter()
        .filter(|event| is_visible(event.category_id.as_deref(), &private))
        .collect()
}

/// Same filter for periods.
pub fn shared_periods(periods: Vec<Period>, categories: &[Category]) -> Vec<Period> {
    let private = private_ids(categories);
    periods
        .into_iter()
        .filter(|period| is_visible(period.category_id.as_deref(), &private))
        .collect()
}

fn private_ids(categories: &[Category]) -> HashSet<&str> {
    categories
        .iter()
        .filter(|category| category.is_private)
        .map(|category| category.id.as_str())
        .collect()
}

fn is_visible(category_id: Option<&str>, private: &HashSet<&str>) -> bool {
    category_id.is_none_or(|id| !private.contains(id))
}
