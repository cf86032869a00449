use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub const ALL: [MeetingStatus; 4] = [
        MeetingStatus::Scheduled,
        MeetingStatus::Ongoing,
        MeetingStatus::Completed,
        MeetingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Ongoing => "ongoing",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "Scheduled",
            MeetingStatus::Ongoing => "Ongoing",
            MeetingStatus::Completed => "Completed",
            MeetingStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(MeetingStatus::Scheduled),
            "ongoing" => Some(MeetingStatus::Ongoing),
            "completed" => Some(MeetingStatus::Completed),
            "cancelled" => Some(MeetingStatus::Cancelled),
            _ => None,
        }
    }

    /// List ordering: running meetings first, cancelled last.
    pub fn sort_rank(&self) -> u8 {
        match self {
            MeetingStatus::Ongoing => 0,
            MeetingStatus::Scheduled => 1,
            MeetingStatus::Completed => 2,
            MeetingStatus::Cancelled => 3,
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default bounds used when a meeting has no start or end time.
pub fn day_start() -> NaiveTime {
    NaiveTime::MIN
}

pub fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// The inclusive local-time window a meeting occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl MeetingWindow {
    pub fn new(date: NaiveDate, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        MeetingWindow {
            start: date.and_time(start.unwrap_or_else(day_start)),
            end: date.and_time(end.unwrap_or_else(day_end)),
        }
    }

    /// Build from stored strings; empty times fall back to the whole day.
    pub fn parse(date: &str, start: &str, end: &str) -> Option<Self> {
        let date = parse_date(date)?;
        let start = if start.trim().is_empty() { None } else { Some(parse_time(start)?) };
        let end = if end.trim().is_empty() { None } else { Some(parse_time(end)?) };
        Some(MeetingWindow::new(date, start, end))
    }
}

/// Derive status from the clock alone. Never returns `Cancelled`.
pub fn derive_status(window: &MeetingWindow, now: NaiveDateTime) -> MeetingStatus {
    if now < window.start {
        MeetingStatus::Scheduled
    } else if now <= window.end {
        MeetingStatus::Ongoing
    } else {
        MeetingStatus::Completed
    }
}

/// A persisted `cancelled` overrides the clock; anything else is recomputed.
pub fn effective_status(persisted: MeetingStatus, window: &MeetingWindow, now: NaiveDateTime) -> MeetingStatus {
    if persisted == MeetingStatus::Cancelled {
        MeetingStatus::Cancelled
    } else {
        derive_status(window, now)
    }
}

/// Current server-local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
