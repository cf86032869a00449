use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::geofence::Coordinate;
use crate::signature::Signature;

use super::lateness::Lateness;

/// One participant's check-in for one meeting.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Attendee {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub identifier: String,
    pub phone: String,
    pub checked_in_at: DateTime<Utc>,
    pub is_late: bool,
    pub late_minutes: i32,
    pub signature: String,
    pub photo_proof: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_meters: Option<f64>,
}

impl Attendee {
    /// Check-in time in server-local time, `HH:MM:SS`.
    pub fn checked_in_time(&self) -> String {
        self.checked_in_at.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    pub fn checked_in_full(&self) -> String {
        self.checked_in_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn distance_str(&self) -> String {
        self.distance_meters.map(|d| format!("{d:.0} m")).unwrap_or_default()
    }
}

/// Raw body of the check-in form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckInForm {
    pub csrf_token: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub phone: String,
    /// JSON recorded by the signature pad script.
    #[serde(default)]
    pub signature_data: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    /// Set by the browser when geolocation failed ("denied", "unsupported", ...).
    #[serde(default)]
    pub geo_error: String,
    #[serde(default)]
    pub photo_proof: String,
}

/// Location evidence attached to a check-in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckInLocation {
    pub point: Coordinate,
    pub distance_meters: f64,
}

/// A validated check-in, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendee {
    pub meeting_id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub identifier: String,
    pub phone: String,
    pub lateness: Lateness,
    pub signature: Signature,
    pub photo_proof: Option<String>,
    pub location: Option<CheckInLocation>,
}

/// Result of attempting to store a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    Recorded(i64),
    /// `max_participants` already reached.
    Full,
    /// This identifier already checked in to the meeting.
    Duplicate,
}
