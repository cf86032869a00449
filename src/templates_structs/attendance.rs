use askama::Template;

use crate::geofence::Geofence;
use crate::models::attendee::CheckInForm;
use crate::models::meeting::{Meeting, MeetingFilter, MeetingStatus};
use super::PublicContext;

#[derive(Template)]
#[template(path = "attendance/list.html")]
pub struct ParticipantListTemplate {
    pub ctx: PublicContext,
    pub meetings: Vec<Meeting>,
    pub filter: MeetingFilter,
    pub leaders: Vec<String>,
    pub locations: Vec<String>,
    pub statuses: Vec<MeetingStatus>,
}

#[derive(Template)]
#[template(path = "attendance/form.html")]
pub struct CheckInTemplate {
    pub ctx: PublicContext,
    pub meeting: Meeting,
    pub form: CheckInForm,
    pub errors: Vec<String>,
    /// Why check-in is unavailable; the form is hidden when set.
    pub closed_message: Option<String>,
    pub geofence: Option<Geofence>,
    pub require_photo: bool,
    pub late_minutes_now: i32,
}

#[derive(Template)]
#[template(path = "attendance/done.html")]
pub struct CheckInDoneTemplate {
    pub ctx: PublicContext,
    pub meeting: Meeting,
    pub name: String,
    pub is_late: bool,
    pub late_minutes: i32,
    pub reset_delay_secs: u64,
}
