use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::export::{self, csv as export_csv};
use crate::models::attendee;
use crate::models::dashboard::{AttendanceStats, MeetingStats};
use crate::models::meeting::{self, local_now, Meeting, MeetingFilter};
use crate::templates_structs::{PrintAttendanceTemplate, PrintMeetingsTemplate};
use super::crud::helpers;

fn csv_response(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", format!("attachment; filename=\"{filename}\"")))
        .body(body)
}

fn export_failed(e: export::ExportError) -> AppError {
    AppError::Export(e.to_string())
}

/// Meetings matching the admin dashboard's current filter.
async fn filtered_meetings(pool: &PgPool, query: &HashMap<String, String>) -> Result<(Vec<Meeting>, MeetingFilter), AppError> {
    let now = local_now();
    let all = meeting::find_all(pool, now).await?;
    let filter = MeetingFilter::from_query(query);
    Ok((filter.apply(&all, now.date()), filter))
}

/// GET /meetings/export.csv
pub async fn export_meetings_csv(
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let (meetings, _) = filtered_meetings(&pool, &query).await?;
    let body = export_csv::meetings_csv(&meetings).map_err(export_failed)?;
    let filename = format!("meetings-{}.csv", local_now().format("%Y%m%d"));
    Ok(csv_response(&filename, body))
}

/// GET /meetings/print
pub async fn print_meetings(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let now = local_now();
    let (meetings, filter) = filtered_meetings(&pool, &query).await?;
    let stats = MeetingStats::compute(&meetings, now.date());
    render(PrintMeetingsTemplate {
        app_name: config.app_name.clone(),
        filter_summary: describe_filter(&filter),
        meetings,
        stats,
        printed_at: now.format("%d %B %Y %H:%M").to_string(),
    })
}

/// GET /meetings/{id}/attendees.csv
pub async fn export_attendees_csv(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let m = helpers::load_meeting(&pool, id).await?;
    let attendees = attendee::find_by_meeting(&pool, id).await?;
    let body = export_csv::attendees_csv(&m, &attendees).map_err(export_failed)?;
    let filename = format!("attendance-{}-{}.csv", export::slug(&m.title), m.date_str());
    Ok(csv_response(&filename, body))
}

/// GET /meetings/{id}/print
pub async fn print_attendance(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let meeting = helpers::load_meeting(&pool, id).await?;
    let attendees = attendee::find_by_meeting(&pool, id).await?;
    let stats = AttendanceStats::compute(&attendees);
    render(PrintAttendanceTemplate {
        app_name: config.app_name.clone(),
        meeting,
        attendees,
        stats,
        printed_at: local_now().format("%d %B %Y %H:%M").to_string(),
    })
}

/// Human-readable filter line for the printed report header.
fn describe_filter(filter: &MeetingFilter) -> String {
    let mut parts = vec![];
    if !filter.search.is_empty() {
        parts.push(format!("search \"{}\"", filter.search));
    }
    if let Some(s) = filter.status {
        parts.push(format!("status {}", s.label()));
    }
    if !filter.date_is("all") {
        parts.push(format!("date {}", filter.date.as_str()));
    }
    if let Some(l) = &filter.leader {
        parts.push(format!("leader {l}"));
    }
    if let Some(l) = &filter.location {
        parts.push(format!("location {l}"));
    }
    if parts.is_empty() {
        "All meetings".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::{DateBucket, MeetingStatus};

    #[test]
    fn describes_filters() {
        assert_eq!(describe_filter(&MeetingFilter::default()), "All meetings");
        let f = MeetingFilter {
            status: Some(MeetingStatus::Ongoing),
            date: DateBucket::Week,
            leader: Some("Dewi".into()),
            ..Default::default()
        };
        assert_eq!(describe_filter(&f), "status Ongoing, date week, leader Dewi");
    }
}
