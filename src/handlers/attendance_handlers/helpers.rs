use chrono::NaiveDateTime;

use crate::auth::validate;
use crate::config::AttendanceConfig;
use crate::geofence::{Coordinate, GeofenceResult};
use crate::models::attendee::{CheckInForm, CheckInLocation, CheckInWindow, Lateness, NewAttendee};
use crate::models::meeting::Meeting;
use crate::signature::SignatureInput;

/// Session key holding the attendee id of the last successful check-in.
pub const LAST_CHECKIN_KEY: &str = "last_checkin";

/// Upper bound on the photo data URL (about 3 MB of JPEG).
pub const MAX_PHOTO_LEN: usize = 4_000_000;

const PHOTO_PREFIXES: [&str; 2] = ["data:image/jpeg;base64,", "data:image/png;base64,"];

/// Turn a submitted check-in into a record, or the list of problems to show.
pub fn validate_check_in(
    form: &CheckInForm,
    meeting: &Meeting,
    now: NaiveDateTime,
    cfg: &AttendanceConfig,
) -> Result<NewAttendee, Vec<String>> {
    let window = CheckInWindow::evaluate(meeting, now, cfg.opens_before_minutes);
    if !window.is_open() {
        return Err(vec![window.message()]);
    }

    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 120));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.position, "Position", 120));
    errors.extend(validate::validate_identifier(&form.identifier));
    errors.extend(validate::validate_phone(&form.phone));

    let signature = if form.signature_data.trim().is_empty() {
        errors.push("Please sign in the signature box".to_string());
        None
    } else {
        match SignatureInput::from_json(&form.signature_data).and_then(|input| input.render()) {
            Ok(sig) if sig.is_empty() => {
                errors.push("Please sign in the signature box".to_string());
                None
            }
            Ok(sig) => Some(sig),
            Err(e) => {
                log::warn!("Rejected signature for meeting {}: {e}", meeting.id);
                errors.push("The signature could not be read. Please clear it and sign again".to_string());
                None
            }
        }
    };

    let location = match &cfg.geofence {
        None => None,
        Some(fence) => {
            let point = parse_coordinate(&form.latitude, &form.longitude);
            let result = match point {
                Some(p) if form.geo_error.trim().is_empty() => fence.check(p),
                _ => GeofenceResult::unavailable(form.geo_error.trim()),
            };
            match (result.valid, point, result.distance_meters) {
                (true, Some(point), Some(distance_meters)) => Some(CheckInLocation { point, distance_meters }),
                _ => {
                    errors.push(result.message);
                    None
                }
            }
        }
    };

    let photo_proof = match check_photo(&form.photo_proof, cfg.require_photo) {
        Ok(photo) => photo,
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match signature {
        Some(signature) if errors.is_empty() => Ok(NewAttendee {
            meeting_id: meeting.id,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            position: form.position.trim().to_string(),
            identifier: form.identifier.trim().to_string(),
            phone: form.phone.trim().to_string(),
            lateness: Lateness::compute(meeting.start_at(), now),
            signature,
            photo_proof,
            location,
        }),
        _ => Err(errors),
    }
}

fn parse_coordinate(lat: &str, lng: &str) -> Option<Coordinate> {
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    Coordinate::new(lat, lng)
}

fn check_photo(raw: &str, required: bool) -> Result<Option<String>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return if required {
            Err("Please take a photo as proof of attendance".to_string())
        } else {
            Ok(None)
        };
    }
    if raw.len() > MAX_PHOTO_LEN {
        return Err("The photo is too large. Please retake it".to_string());
    }
    if !PHOTO_PREFIXES.iter().any(|p| raw.starts_with(p)) {
        return Err("The photo must be a JPEG or PNG image".to_string());
    }
    Ok(Some(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geofence::Geofence;
    use crate::models::meeting::MeetingStatus;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn meeting() -> Meeting {
        Meeting {
            id: 7,
            title: "Budget Review".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0),
            location: "Hall A".into(),
            leader: "Dewi".into(),
            description: String::new(),
            notes: String::new(),
            max_participants: None,
            cancelled: false,
            status: MeetingStatus::Scheduled,
            attendee_count: 0,
            created_at: Utc::now(),
        }
    }

    const SIGNED: &str = r#"{"width":300,"height":150,"events":[
        {"type":"down","x":10,"y":10},{"type":"move","x":120,"y":80},{"type":"up"}]}"#;

    fn form() -> CheckInForm {
        CheckInForm {
            name: "Rizal Hakim".into(),
            email: "rizal@example.go.id".into(),
            position: "Finance".into(),
            identifier: "EMP-003".into(),
            phone: "081200000003".into(),
            signature_data: SIGNED.into(),
            ..Default::default()
        }
    }

    fn fence() -> Geofence {
        Geofence { center: Coordinate::new(-7.3181, 112.7221).unwrap(), radius_meters: 200.0 }
    }

    #[test]
    fn valid_submission_builds_a_record() {
        let new = validate_check_in(&form(), &meeting(), at("2025-06-01T09:05:30"), &AttendanceConfig::default()).unwrap();
        assert_eq!(new.meeting_id, 7);
        assert_eq!(new.lateness.minutes(), 5);
        assert!(new.lateness.is_late());
        assert!(new.signature.as_str().starts_with("data:image/png;base64,"));
        assert!(new.location.is_none());
        assert!(new.photo_proof.is_none());
    }

    #[test]
    fn late_check_in_after_the_end_counts_from_start() {
        let new = validate_check_in(&form(), &meeting(), at("2025-06-01T12:15:00"), &AttendanceConfig::default()).unwrap();
        assert_eq!(new.lateness.minutes(), 195);
    }

    #[test]
    fn missing_identity_and_signature() {
        let errors = validate_check_in(&CheckInForm::default(), &meeting(), at("2025-06-01T09:00:00"), &AttendanceConfig::default())
            .unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Name")));
        assert!(errors.iter().any(|e| e.contains("Email")));
        assert!(errors.iter().any(|e| e.contains("Employee ID")));
        assert!(errors.iter().any(|e| e.contains("Phone")));
        assert!(errors.iter().any(|e| e.contains("sign")));
    }

    #[test]
    fn blank_or_cleared_signature_is_rejected() {
        let f = CheckInForm {
            signature_data: r#"{"width":300,"height":150,"events":[{"type":"down","x":1,"y":1},{"type":"move","x":50,"y":50},{"type":"clear"}]}"#.into(),
            ..form()
        };
        let errors = validate_check_in(&f, &meeting(), at("2025-06-01T09:00:00"), &AttendanceConfig::default()).unwrap_err();
        assert_eq!(errors, vec!["Please sign in the signature box".to_string()]);
    }

    #[test]
    fn signature_points_off_the_surface_are_refused() {
        let f = CheckInForm {
            signature_data: r#"{"width":300,"height":150,"events":[{"type":"down","x":0,"y":0},{"type":"move","x":100000000,"y":0},{"type":"up"}]}"#.into(),
            ..form()
        };
        let errors = validate_check_in(&f, &meeting(), at("2025-06-01T09:00:00"), &AttendanceConfig::default()).unwrap_err();
        assert_eq!(errors, vec!["The signature could not be read. Please clear it and sign again".to_string()]);
    }

    #[test]
    fn closed_window_short_circuits() {
        let errors = validate_check_in(&form(), &meeting(), at("2025-06-02T09:00:00"), &AttendanceConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("closed"));
    }

    #[test]
    fn geofence_requires_a_nearby_location_and_photo() {
        let cfg = AttendanceConfig { geofence: Some(fence()), require_photo: true, ..Default::default() };
        let now = at("2025-06-01T08:55:00");

        let errors = validate_check_in(&CheckInForm { geo_error: "denied".into(), ..form() }, &meeting(), now, &cfg).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("denied")));
        assert!(errors.iter().any(|e| e.contains("photo")));

        let far = CheckInForm { latitude: "-7.3281".into(), longitude: "112.7221".into(), ..form() };
        let errors = validate_check_in(&far, &meeting(), now, &cfg).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("200 m")));

        let near = CheckInForm {
            latitude: "-7.3182".into(),
            longitude: "112.7221".into(),
            photo_proof: "data:image/jpeg;base64,/9j/4AAQ".into(),
            ..form()
        };
        let new = validate_check_in(&near, &meeting(), now, &cfg).unwrap();
        let loc = new.location.expect("location recorded");
        assert!(loc.distance_meters < 200.0);
        assert!(!new.lateness.is_late());
        assert!(new.photo_proof.is_some());
    }

    #[test]
    fn photo_format_is_checked() {
        assert_eq!(check_photo("", false), Ok(None));
        assert!(check_photo("", true).is_err());
        assert!(check_photo("data:text/html;base64,PGI+", false).is_err());
        assert!(check_photo("data:image/png;base64,iVBOR", true).unwrap().is_some());
    }
}
