use std::collections::HashMap;

use actix_web::{http::StatusCode, web, HttpResponse};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::meeting::{self, local_now, MeetingFilter};
use super::json_error;

/// GET /api/meetings - Meetings with their current status.
/// Query params: q, status, date, leader, location (same as the dashboard filter).
pub async fn list(
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let now = local_now();
    let all = meeting::find_all(&pool, now).await?;
    let filter = MeetingFilter::from_query(&query);
    Ok(HttpResponse::Ok().json(filter.apply(&all, now.date())))
}

/// GET /api/meetings/{id}
pub async fn read(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    match meeting::find_by_id(&pool, id, local_now()).await? {
        Some(m) => Ok(HttpResponse::Ok().json(m)),
        None => Ok(json_error(StatusCode::NOT_FOUND, "Meeting not found")),
    }
}
