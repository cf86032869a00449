use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::filter::Filterable;
use super::status::{effective_status, MeetingStatus, MeetingWindow};

/// A meeting as shown on lists, detail pages and the API.
///
/// `status` is always the effective status at load time; `cancelled`
/// is the persisted override.
#[derive(Debug, Clone, Serialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub leader: String,
    pub description: String,
    pub notes: String,
    pub max_participants: Option<i32>,
    pub cancelled: bool,
    pub status: MeetingStatus,
    pub attendee_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Meeting {
    pub fn window(&self) -> MeetingWindow {
        MeetingWindow::new(self.date, Some(self.start_time), self.end_time)
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// Recompute `status` against `now`.
    pub fn refresh_status(&mut self, now: NaiveDateTime) {
        let persisted = if self.cancelled { MeetingStatus::Cancelled } else { self.status };
        self.status = effective_status(persisted, &self.window(), now);
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Long form for headings, e.g. "Sunday, 01 June 2025".
    pub fn date_long(&self) -> String {
        self.date.format("%A, %d %B %Y").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
    }

    /// "09:00 - 11:00", or "09:00 - end" when no end time is set.
    pub fn time_range(&self) -> String {
        match self.end_time {
            Some(_) => format!("{} - {}", self.start_str(), self.end_str()),
            None => format!("{} - end", self.start_str()),
        }
    }

    pub fn capacity_str(&self) -> String {
        self.max_participants.map(|n| n.to_string()).unwrap_or_default()
    }

    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.attendee_count >= i64::from(max))
    }
}

impl Filterable for Meeting {
    fn title(&self) -> &str {
        &self.title
    }
    fn leader(&self) -> &str {
        &self.leader
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn status(&self) -> MeetingStatus {
        self.status
    }
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Raw form body from the create/edit page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub leader: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub max_participants: String,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub cancelled: Option<String>,
}

impl MeetingForm {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    /// Pre-fill the edit form from a stored meeting.
    pub fn from_meeting(m: &Meeting) -> Self {
        MeetingForm {
            csrf_token: String::new(),
            title: m.title.clone(),
            date: m.date_str(),
            start_time: form_time(m.start_time),
            end_time: m.end_time.map(form_time).unwrap_or_default(),
            location: m.location.clone(),
            leader: m.leader.clone(),
            description: m.description.clone(),
            notes: m.notes.clone(),
            max_participants: m.capacity_str(),
            cancelled: m.cancelled.then(|| "on".to_string()),
        }
    }
}

/// `HH:MM`, keeping seconds only when the stored time has them.
fn form_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// Validated values ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeeting {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub leader: String,
    pub description: String,
    pub notes: String,
    pub max_participants: Option<i32>,
    pub cancelled: bool,
}

impl NewMeeting {
    /// Value written to the `status` column: the override, or the status derived at `now`.
    pub fn stored_status(&self, now: NaiveDateTime) -> MeetingStatus {
        if self.cancelled {
            return MeetingStatus::Cancelled;
        }
        let window = MeetingWindow::new(self.date, Some(self.start_time), self.end_time);
        super::status::derive_status(&window, now)
    }
}
