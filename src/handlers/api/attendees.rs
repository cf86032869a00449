use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::attendee::{self, Attendee};
use crate::models::dashboard::AttendanceStats;
use crate::models::meeting::{self, local_now};
use super::json_error;

#[derive(Serialize)]
struct AttendeeList {
    meeting_id: i64,
    stats: AttendanceStats,
    attendees: Vec<Attendee>,
}

/// GET /api/meetings/{id}/attendees - Re-fetch target of the detail page's live feed.
pub async fn list(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if meeting::find_by_id(&pool, id, local_now()).await?.is_none() {
        return Ok(json_error(StatusCode::NOT_FOUND, "Meeting not found"));
    }
    let attendees = attendee::find_by_meeting(&pool, id).await?;
    Ok(HttpResponse::Ok().json(AttendeeList {
        meeting_id: id,
        stats: AttendanceStats::compute(&attendees),
        attendees,
    }))
}
