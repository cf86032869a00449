use askama::Template;

use crate::models::attendee::Attendee;
use crate::models::dashboard::{AttendanceStats, MeetingStats};
use crate::models::meeting::{Meeting, MeetingForm};
use super::PageContext;

#[derive(Template)]
#[template(path = "meetings/form.html")]
pub struct MeetingFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: MeetingForm,
    pub errors: Vec<String>,
    /// Set when editing, for the delete button.
    pub meeting_id: Option<i64>,
}

#[derive(Template)]
#[template(path = "meetings/detail.html")]
pub struct MeetingDetailTemplate {
    pub ctx: PageContext,
    pub meeting: Meeting,
    pub attendees: Vec<Attendee>,
    pub stats: AttendanceStats,
    pub checkin_path: String,
}

/// Printable attendance sheet; the browser's print dialog produces the PDF.
#[derive(Template)]
#[template(path = "meetings/print_attendance.html")]
pub struct PrintAttendanceTemplate {
    pub app_name: String,
    pub meeting: Meeting,
    pub attendees: Vec<Attendee>,
    pub stats: AttendanceStats,
    pub printed_at: String,
}

#[derive(Template)]
#[template(path = "meetings/print_list.html")]
pub struct PrintMeetingsTemplate {
    pub app_name: String,
    pub meetings: Vec<Meeting>,
    pub stats: MeetingStats,
    pub filter_summary: String,
    pub printed_at: String,
}
