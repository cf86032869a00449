use askama::Template;

use crate::audit::AuditEntry;
use crate::models::dashboard::MeetingStats;
use crate::models::meeting::{Meeting, MeetingFilter, MeetingStatus};
use super::PageContext;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub stats: MeetingStats,
    pub meetings: Vec<Meeting>,
    pub filter: MeetingFilter,
    /// Query string of the active filter, for export and print links.
    pub filter_query: String,
    pub leaders: Vec<String>,
    pub locations: Vec<String>,
    pub statuses: Vec<MeetingStatus>,
    pub recent_activity: Vec<AuditEntry>,
}
