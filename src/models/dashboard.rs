use chrono::NaiveDate;
use serde::Serialize;

use crate::models::attendee::Attendee;
use crate::models::meeting::{Meeting, MeetingStatus};

// ---------- Meeting stats ----------

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingStats {
    pub total: usize,
    pub scheduled: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub today: usize,
    pub total_attendees: i64,
    /// Rounded mean attendees per meeting; 0 with no meetings.
    pub avg_attendees: i64,
}

impl MeetingStats {
    pub fn compute(meetings: &[Meeting], today: NaiveDate) -> Self {
        let mut stats = MeetingStats {
            total: meetings.len(),
            ..Default::default()
        };
        for m in meetings {
            match m.status {
                MeetingStatus::Scheduled => stats.scheduled += 1,
                MeetingStatus::Ongoing => stats.ongoing += 1,
                MeetingStatus::Completed => stats.completed += 1,
                MeetingStatus::Cancelled => stats.cancelled += 1,
            }
            if m.date == today {
                stats.today += 1;
            }
            stats.total_attendees += m.attendee_count;
        }
        if stats.total > 0 {
            stats.avg_attendees = (stats.total_attendees as f64 / stats.total as f64).round() as i64;
        }
        stats
    }
}

// ---------- Attendance stats ----------

/// Punctuality breakdown for one meeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub on_time: usize,
    pub late: usize,
    /// Rounded mean lateness among late attendees only.
    pub avg_late_minutes: i64,
}

impl AttendanceStats {
    pub fn compute(attendees: &[Attendee]) -> Self {
        let late: Vec<i64> = attendees
            .iter()
            .filter(|a| a.is_late)
            .map(|a| i64::from(a.late_minutes))
            .collect();
        let avg_late_minutes = if late.is_empty() {
            0
        } else {
            (late.iter().sum::<i64>() as f64 / late.len() as f64).round() as i64
        };
        AttendanceStats {
            total: attendees.len(),
            on_time: attendees.len() - late.len(),
            late: late.len(),
            avg_late_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn meeting(date: NaiveDate, status: MeetingStatus, attendees: i64) -> Meeting {
        Meeting {
            id: 0,
            title: "m".into(),
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: None,
            location: String::new(),
            leader: String::new(),
            description: String::new(),
            notes: String::new(),
            max_participants: None,
            cancelled: status == MeetingStatus::Cancelled,
            status,
            attendee_count: attendees,
            created_at: Utc::now(),
        }
    }

    fn attendee(late_minutes: i32) -> Attendee {
        Attendee {
            id: 0,
            meeting_id: 1,
            name: "a".into(),
            email: String::new(),
            position: String::new(),
            identifier: String::new(),
            phone: String::new(),
            checked_in_at: Utc::now(),
            is_late: late_minutes > 0,
            late_minutes,
            signature: String::new(),
            photo_proof: None,
            latitude: None,
            longitude: None,
            distance_meters: None,
        }
    }

    #[test]
    fn empty_lists_give_zeroes() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(MeetingStats::compute(&[], today), MeetingStats::default());
        assert_eq!(AttendanceStats::compute(&[]), AttendanceStats::default());
    }

    #[test]
    fn meeting_stats_count_by_status() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let list = vec![
            meeting(today, MeetingStatus::Ongoing, 4),
            meeting(today, MeetingStatus::Scheduled, 0),
            meeting(yesterday, MeetingStatus::Completed, 3),
            meeting(yesterday, MeetingStatus::Cancelled, 0),
        ];
        let stats = MeetingStats::compute(&list, today);
        assert_eq!(stats.total, 4);
        assert_eq!((stats.scheduled, stats.ongoing, stats.completed, stats.cancelled), (1, 1, 1, 1));
        assert_eq!(stats.today, 2);
        assert_eq!(stats.total_attendees, 7);
        // 7 / 4 = 1.75
        assert_eq!(stats.avg_attendees, 2);
    }

    #[test]
    fn average_lateness_ignores_on_time_attendees() {
        let stats = AttendanceStats::compute(&[attendee(0), attendee(5), attendee(10), attendee(0)]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.on_time, 2);
        assert_eq!(stats.late, 2);
        assert_eq!(stats.avg_late_minutes, 8);
    }
}
