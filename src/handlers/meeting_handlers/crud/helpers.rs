use sqlx::PgPool;

use crate::auth::validate;
use crate::errors::AppError;
use crate::models::meeting::{self, status::{parse_date, parse_time}, Meeting, MeetingForm, NewMeeting};

/// Validate the create/edit form. Title, date and start time are required;
/// everything else is optional but must parse when given.
pub fn validate_meeting_form(form: &MeetingForm) -> Result<NewMeeting, Vec<String>> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.title, "Title", 200));
    errors.extend(validate::validate_optional(&form.location, "Location", 200));
    errors.extend(validate::validate_optional(&form.leader, "Leader", 120));
    errors.extend(validate::validate_optional(&form.description, "Description", 4000));
    errors.extend(validate::validate_optional(&form.notes, "Notes", 4000));

    let date = if form.date.trim().is_empty() {
        errors.push("Date is required".to_string());
        None
    } else {
        let parsed = parse_date(&form.date);
        if parsed.is_none() {
            errors.push("Date must be in YYYY-MM-DD format".to_string());
        }
        parsed
    };

    let start_time = if form.start_time.trim().is_empty() {
        errors.push("Start time is required".to_string());
        None
    } else {
        let parsed = parse_time(&form.start_time);
        if parsed.is_none() {
            errors.push("Start time must be in HH:MM format".to_string());
        }
        parsed
    };

    let end_time = if form.end_time.trim().is_empty() {
        None
    } else {
        let parsed = parse_time(&form.end_time);
        if parsed.is_none() {
            errors.push("End time must be in HH:MM format".to_string());
        }
        parsed
    };

    let max_participants = validate::parse_optional_positive(&form.max_participants, "Maximum participants")
        .unwrap_or_else(|e| {
            errors.push(e);
            None
        });

    match (date, start_time) {
        (Some(date), Some(start_time)) if errors.is_empty() => Ok(NewMeeting {
            title: form.title.trim().to_string(),
            date,
            start_time,
            end_time,
            location: form.location.trim().to_string(),
            leader: form.leader.trim().to_string(),
            description: form.description.trim().to_string(),
            notes: form.notes.trim().to_string(),
            max_participants,
            cancelled: form.is_cancelled(),
        }),
        _ => Err(errors),
    }
}

/// Load a meeting or fail with `NotFound`.
pub async fn load_meeting(pool: &PgPool, id: i64) -> Result<Meeting, AppError> {
    meeting::find_by_id(pool, id, meeting::local_now())
        .await?
        .ok_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn form() -> MeetingForm {
        MeetingForm {
            title: " Budget Review ".into(),
            date: "2025-06-01".into(),
            start_time: "09:00".into(),
            end_time: "11:00".into(),
            location: "Hall A".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let new = validate_meeting_form(&form()).unwrap();
        assert_eq!(new.title, "Budget Review");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(new.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(new.end_time, NaiveTime::from_hms_opt(11, 0, 0));
        assert_eq!(new.max_participants, None);
        assert!(!new.cancelled);
    }

    #[test]
    fn title_date_and_start_are_required() {
        let errors = validate_meeting_form(&MeetingForm::default()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Title")));
        assert!(errors.iter().any(|e| e.contains("Date")));
        assert!(errors.iter().any(|e| e.contains("Start time")));
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let f = MeetingForm { end_time: String::new(), location: String::new(), ..form() };
        let new = validate_meeting_form(&f).unwrap();
        assert_eq!(new.end_time, None);
    }

    #[test]
    fn bad_values_are_reported() {
        let f = MeetingForm {
            date: "01/06/2025".into(),
            end_time: "late".into(),
            max_participants: "0".into(),
            ..form()
        };
        let errors = validate_meeting_form(&f).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn omitted_required_fields_reach_validation() {
        let posted: MeetingForm = serde_urlencoded::from_str("csrf_token=abc&location=Hall+A").unwrap();
        let errors = validate_meeting_form(&posted).unwrap_err();
        assert!(errors.contains(&"Title is required".to_string()), "{errors:?}");
        assert!(errors.contains(&"Date is required".to_string()));
        assert!(errors.contains(&"Start time is required".to_string()));
    }

    #[test]
    fn editing_keeps_stored_seconds() {
        let stored = Meeting {
            id: 1,
            title: "Budget Review".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 30).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0),
            location: "Hall A".into(),
            leader: String::new(),
            description: String::new(),
            notes: String::new(),
            max_participants: Some(40),
            cancelled: false,
            status: crate::models::meeting::MeetingStatus::Scheduled,
            attendee_count: 0,
            created_at: chrono::Utc::now(),
        };
        let form = MeetingForm::from_meeting(&stored);
        assert_eq!((form.start_time.as_str(), form.end_time.as_str()), ("09:00:30", "11:00"));

        let resubmitted = validate_meeting_form(&form).unwrap();
        assert_eq!(resubmitted.start_time, stored.start_time);
        assert_eq!(resubmitted.end_time, stored.end_time);
        assert_eq!(resubmitted.max_participants, Some(40));
    }

    #[test]
    fn cancelled_checkbox_and_capacity() {
        let f = MeetingForm { cancelled: Some("on".into()), max_participants: "25".into(), ..form() };
        let new = validate_meeting_form(&f).unwrap();
        assert!(new.cancelled);
        assert_eq!(new.max_participants, Some(25));
    }
}
