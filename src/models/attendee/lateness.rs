use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::models::meeting::Meeting;

/// Whole minutes past the meeting start at check-in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lateness {
    minutes: i32,
}

impl Lateness {
    /// `max(0, floor((now - start) / 1 min))`.
    pub fn compute(start: NaiveDateTime, now: NaiveDateTime) -> Self {
        let minutes = (now - start).num_minutes().clamp(0, i64::from(i32::MAX));
        Lateness { minutes: minutes as i32 }
    }

    pub fn minutes(&self) -> i32 {
        self.minutes
    }

    pub fn is_late(&self) -> bool {
        self.minutes > 0
    }
}

/// Whether a meeting accepts check-ins right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInWindow {
    Open,
    NotYetOpen { opens_at: NaiveDateTime },
    Closed,
    Cancelled,
}

impl CheckInWindow {
    /// Open from `opens_before_minutes` before the start until the end of the meeting day.
    pub fn evaluate(meeting: &Meeting, now: NaiveDateTime, opens_before_minutes: i64) -> Self {
        if meeting.cancelled {
            return CheckInWindow::Cancelled;
        }
        // never earlier than the start of the meeting day
        let opens_at = (meeting.start_at() - Duration::minutes(opens_before_minutes.max(0)))
            .max(meeting.date.and_time(NaiveTime::MIN));
        let today = now.date();
        if today > meeting.date {
            CheckInWindow::Closed
        } else if today < meeting.date || now < opens_at {
            CheckInWindow::NotYetOpen { opens_at }
        } else {
            CheckInWindow::Open
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CheckInWindow::Open)
    }

    pub fn message(&self) -> String {
        match self {
            CheckInWindow::Open => String::new(),
            CheckInWindow::NotYetOpen { opens_at } => format!(
                "Check-in opens on {} at {}.",
                opens_at.format("%d %B %Y"),
                opens_at.format("%H:%M")
            ),
            CheckInWindow::Closed => "Check-in for this meeting has closed.".to_string(),
            CheckInWindow::Cancelled => "This meeting has been cancelled.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::MeetingStatus;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn meeting(cancelled: bool) -> Meeting {
        Meeting {
            id: 1,
            title: "Budget Review".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0),
            location: String::new(),
            leader: String::new(),
            description: String::new(),
            notes: String::new(),
            max_participants: None,
            cancelled,
            status: if cancelled { MeetingStatus::Cancelled } else { MeetingStatus::Scheduled },
            attendee_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn on_time_and_early_are_not_late() {
        let start = at("2025-06-01T09:00:00");
        assert_eq!(Lateness::compute(start, at("2025-06-01T08:45:00")).minutes(), 0);
        assert_eq!(Lateness::compute(start, start).minutes(), 0);
        // under a full minute is still on time
        let l = Lateness::compute(start, at("2025-06-01T09:00:59"));
        assert_eq!(l.minutes(), 0);
        assert!(!l.is_late());
    }

    #[test]
    fn late_minutes_are_floored() {
        let start = at("2025-06-01T09:00:00");
        let l = Lateness::compute(start, at("2025-06-01T09:07:59"));
        assert_eq!(l.minutes(), 7);
        assert!(l.is_late());
    }

    #[test]
    fn measured_from_start_even_after_the_end() {
        let start = at("2025-06-01T09:00:00");
        let l = Lateness::compute(start, at("2025-06-01T12:15:00"));
        assert_eq!(l.minutes(), 195);
    }

    #[test]
    fn is_late_iff_minutes_positive() {
        let start = at("2025-06-01T09:00:00");
        for secs in [-3600, -1, 0, 59, 60, 61, 7200] {
            let l = Lateness::compute(start, start + Duration::seconds(secs));
            assert!(l.minutes() >= 0);
            assert_eq!(l.is_late(), l.minutes() > 0, "secs={secs}");
        }
    }

    #[test]
    fn window_opens_before_start_and_closes_after_the_day() {
        let m = meeting(false);
        assert_eq!(
            CheckInWindow::evaluate(&m, at("2025-06-01T08:29:00"), 30),
            CheckInWindow::NotYetOpen { opens_at: at("2025-06-01T08:30:00") }
        );
        assert!(CheckInWindow::evaluate(&m, at("2025-06-01T08:30:00"), 30).is_open());
        assert!(CheckInWindow::evaluate(&m, at("2025-06-01T23:59:00"), 30).is_open());
        assert_eq!(CheckInWindow::evaluate(&m, at("2025-06-02T00:00:00"), 30), CheckInWindow::Closed);
        assert!(!CheckInWindow::evaluate(&m, at("2025-05-31T12:00:00"), 30).is_open());
    }

    #[test]
    fn window_opens_at_midnight_for_early_morning_meetings() {
        let m = Meeting { start_time: NaiveTime::from_hms_opt(0, 10, 0).unwrap(), ..meeting(false) };
        let evening_before = CheckInWindow::evaluate(&m, at("2025-05-31T23:50:00"), 30);
        assert_eq!(evening_before, CheckInWindow::NotYetOpen { opens_at: at("2025-06-01T00:00:00") });
        assert_eq!(evening_before.message(), "Check-in opens on 01 June 2025 at 00:00.");
        assert!(CheckInWindow::evaluate(&m, at("2025-06-01T00:00:00"), 30).is_open());
    }

    #[test]
    fn cancelled_meetings_never_open() {
        let m = meeting(true);
        let w = CheckInWindow::evaluate(&m, at("2025-06-01T10:00:00"), 30);
        assert_eq!(w, CheckInWindow::Cancelled);
        assert!(w.message().contains("cancelled"));
    }
}
