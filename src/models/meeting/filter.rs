use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate};

use super::status::MeetingStatus;

/// Sentinel that disables a predicate.
pub const ALL: &str = "all";

/// What the filter engine needs to know about a list item.
pub trait Filterable {
    fn title(&self) -> &str;
    fn leader(&self) -> &str;
    fn location(&self) -> &str;
    fn description(&self) -> &str;
    fn status(&self) -> MeetingStatus;
    fn date(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBucket {
    #[default]
    All,
    Today,
    /// Sunday through Saturday of the current week.
    Week,
    Month,
    Upcoming,
    Past,
}

impl DateBucket {
    pub fn parse(s: &str) -> Self {
        match s {
            "today" => DateBucket::Today,
            "week" => DateBucket::Week,
            "month" => DateBucket::Month,
            "upcoming" => DateBucket::Upcoming,
            "past" => DateBucket::Past,
            _ => DateBucket::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateBucket::All => ALL,
            DateBucket::Today => "today",
            DateBucket::Week => "week",
            DateBucket::Month => "month",
            DateBucket::Upcoming => "upcoming",
            DateBucket::Past => "past",
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateBucket::All => true,
            DateBucket::Today => date == today,
            DateBucket::Week => {
                let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                let week_end = week_start + Duration::days(6);
                date >= week_start && date <= week_end
            }
            DateBucket::Month => date.year() == today.year() && date.month() == today.month(),
            DateBucket::Upcoming => date >= today,
            DateBucket::Past => date < today,
        }
    }
}

/// AND-combined predicates over a meeting list. Empty or `"all"` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingFilter {
    pub search: String,
    pub status: Option<MeetingStatus>,
    pub date: DateBucket,
    pub leader: Option<String>,
    pub location: Option<String>,
}

fn selection(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(String::from)
}

impl MeetingFilter {
    /// Read `q`, `status`, `date`, `leader`, `location` from query parameters.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        MeetingFilter {
            search: query.get("q").map(|s| s.trim().to_string()).unwrap_or_default(),
            status: selection(query.get("status")).and_then(|s| MeetingStatus::parse(&s)),
            date: query.get("date").map(|s| DateBucket::parse(s)).unwrap_or_default(),
            leader: selection(query.get("leader")),
            location: selection(query.get("location")),
        }
    }

    pub fn is_active(&self) -> bool {
        *self != MeetingFilter::default()
    }

    // Dropdown helpers for the templates.

    pub fn status_is(&self, value: &str) -> bool {
        self.status.map(|s| s.as_str()).unwrap_or(ALL) == value
    }

    pub fn date_is(&self, value: &str) -> bool {
        self.date.as_str() == value
    }

    pub fn leader_is(&self, value: &str) -> bool {
        self.leader.as_deref() == Some(value)
    }

    pub fn location_is(&self, value: &str) -> bool {
        self.location.as_deref() == Some(value)
    }

    pub fn matches<T: Filterable>(&self, item: &T, today: NaiveDate) -> bool {
        self.matches_search(item)
            && self.status.is_none_or(|s| item.status() == s)
            && self.leader.as_deref().is_none_or(|l| item.leader() == l)
            && self.location.as_deref().is_none_or(|l| item.location() == l)
            && self.date.contains(item.date(), today)
    }

    fn matches_search<T: Filterable>(&self, item: &T) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [item.title(), item.leader(), item.location(), item.description()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Keep matching items in their original order.
    pub fn apply<T: Filterable + Clone>(&self, items: &[T], today: NaiveDate) -> Vec<T> {
        items.iter().filter(|m| self.matches(*m, today)).cloned().collect()
    }

    /// Query string that reproduces this filter (for export and print links).
    pub fn to_query_string(&self) -> String {
        let status = self.status.map(|s| s.as_str()).unwrap_or(ALL);
        let pairs = [
            ("q", self.search.as_str()),
            ("status", status),
            ("date", self.date.as_str()),
            ("leader", self.leader.as_deref().unwrap_or(ALL)),
            ("location", self.location.as_deref().unwrap_or(ALL)),
        ];
        serde_urlencoded::to_string(pairs).unwrap_or_default()
    }
}

/// Sorted distinct leaders and locations, for the filter dropdowns.
pub fn filter_options<T: Filterable>(items: &[T]) -> (Vec<String>, Vec<String>) {
    let leaders: BTreeSet<String> = items
        .iter()
        .map(|m| m.leader().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let locations: BTreeSet<String> = items
        .iter()
        .map(|m| m.location().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (leaders.into_iter().collect(), locations.into_iter().collect())
}
