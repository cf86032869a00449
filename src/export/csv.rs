use super::ExportError;
use crate::models::attendee::Attendee;
use crate::models::meeting::Meeting;

fn finish(writer: ::csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Io(e.to_string()))
}

/// One row per meeting, in the order given.
pub fn meetings_csv(meetings: &[Meeting]) -> Result<String, ExportError> {
    let mut writer = ::csv::Writer::from_writer(vec![]);
    writer.write_record([
        "Title", "Date", "Start", "End", "Location", "Leader", "Status", "Attendees", "Capacity",
    ])?;
    for m in meetings {
        writer.write_record([
            m.title.clone(),
            m.date_str(),
            m.start_str(),
            m.end_str(),
            m.location.clone(),
            m.leader.clone(),
            m.status.label().to_string(),
            m.attendee_count.to_string(),
            m.capacity_str(),
        ])?;
    }
    finish(writer)
}

/// Attendance sheet for one meeting. Signatures and photos are left out.
pub fn attendees_csv(meeting: &Meeting, attendees: &[Attendee]) -> Result<String, ExportError> {
    let mut writer = ::csv::Writer::from_writer(vec![]);
    writer.write_record([
        "No", "Meeting", "Date", "Name", "Employee ID", "Position", "Email", "Phone",
        "Checked in", "Late", "Late minutes", "Distance (m)",
    ])?;
    for (i, a) in attendees.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            meeting.title.clone(),
            meeting.date_str(),
            a.name.clone(),
            a.identifier.clone(),
            a.position.clone(),
            a.email.clone(),
            a.phone.clone(),
            a.checked_in_full(),
            if a.is_late { "yes" } else { "no" }.to_string(),
            a.late_minutes.to_string(),
            a.distance_meters.map(|d| format!("{d:.0}")).unwrap_or_default(),
        ])?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::MeetingStatus;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn meeting(title: &str) -> Meeting {
        Meeting {
            id: 1,
            title: title.into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0),
            location: "Hall A".into(),
            leader: "Dewi".into(),
            description: String::new(),
            notes: String::new(),
            max_participants: Some(40),
            cancelled: false,
            status: MeetingStatus::Completed,
            attendee_count: 2,
            created_at: Utc::now(),
        }
    }

    fn attendee(name: &str, late_minutes: i32) -> Attendee {
        Attendee {
            id: 1,
            meeting_id: 1,
            name: name.into(),
            email: "a@example.go.id".into(),
            position: "Finance".into(),
            identifier: "EMP-1".into(),
            phone: "0812000000".into(),
            checked_in_at: Utc::now(),
            is_late: late_minutes > 0,
            late_minutes,
            signature: "data:image/png;base64,AAAA".into(),
            photo_proof: None,
            latitude: None,
            longitude: None,
            distance_meters: Some(42.4),
        }
    }

    #[test]
    fn meetings_have_header_and_rows() {
        let out = meetings_csv(&[meeting("Budget Review")]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Title,Date,Start,End,Location,Leader,Status,Attendees,Capacity");
        assert_eq!(lines[1], "Budget Review,2025-06-01,09:00,11:00,Hall A,Dewi,Completed,2,40");
    }

    #[test]
    fn fields_with_commas_quotes_and_newlines_are_quoted() {
        let out = meetings_csv(&[meeting("Review, \"Q3\"\nfollow-up")]).unwrap();
        assert!(out.contains("\"Review, \"\"Q3\"\"\nfollow-up\""));
    }

    #[test]
    fn attendee_sheet_numbers_rows_and_omits_signatures() {
        let out = attendees_csv(&meeting("Budget"), &[attendee("Dewi", 0), attendee("Rizal", 12)]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,Budget,2025-06-01,Dewi,"));
        assert!(lines[2].contains(",yes,12,42"));
        assert!(!out.contains("base64"));
    }
}
