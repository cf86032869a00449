use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::attendee;
use crate::models::dashboard::AttendanceStats;
use crate::realtime::{self, Hub, Topic};
use crate::templates_structs::{MeetingDetailTemplate, PageContext};
use super::helpers;

pub async fn detail(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let meeting = helpers::load_meeting(&pool, id).await?;
    let attendees = attendee::find_by_meeting(&pool, id).await?;
    let stats = AttendanceStats::compute(&attendees);

    let ctx = PageContext::build(&session, &config, "/meetings");
    render(MeetingDetailTemplate {
        ctx,
        checkin_path: format!("/attend/{id}"),
        meeting,
        attendees,
        stats,
    })
}

/// Live attendance feed for the detail page.
pub async fn detail_ws(
    req: HttpRequest,
    body: web::Payload,
    pool: web::Data<PgPool>,
    hub: web::Data<Hub>,
    path: web::Path<i64>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = path.into_inner();
    helpers::load_meeting(&pool, id).await?;
    realtime::serve(&req, body, &hub, Topic::Meeting(id))
}
