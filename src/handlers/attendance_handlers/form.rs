use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::attendee::{self, CheckInForm, CheckInWindow, Lateness};
use crate::models::meeting::{self, Meeting};
use crate::templates_structs::{CheckInDoneTemplate, CheckInTemplate, PublicContext};
use super::helpers::LAST_CHECKIN_KEY;

/// Build the check-in page for `meeting`, hiding the form when the window is shut.
pub(super) fn check_in_page(
    session: &Session,
    config: &AppConfig,
    meeting: Meeting,
    form: CheckInForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let now = meeting::local_now();
    let window = CheckInWindow::evaluate(&meeting, now, config.attendance.opens_before_minutes);
    let closed_message = (!window.is_open()).then(|| window.message());
    let late_minutes_now = Lateness::compute(meeting.start_at(), now).minutes();

    render(CheckInTemplate {
        ctx: PublicContext::build(session, config),
        meeting,
        form,
        errors,
        closed_message,
        geofence: config.attendance.geofence,
        require_photo: config.attendance.require_photo,
        late_minutes_now,
    })
}

/// GET /attend/{id}
pub async fn form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let meeting = meeting::find_by_id(&pool, id, meeting::local_now())
        .await?
        .ok_or(AppError::NotFound)?;
    check_in_page(&session, &config, meeting, CheckInForm::default(), vec![])
}

/// GET /attend/{id}/done: confirmation that resets to a blank form after a delay.
pub async fn done(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form_path = format!("/attend/{id}");

    let attendee_id = session.get::<i64>(LAST_CHECKIN_KEY).unwrap_or(None);
    let Some(attendee_id) = attendee_id else {
        return Ok(see_other(&form_path));
    };
    let record = match attendee::find_by_id(&pool, attendee_id).await? {
        Some(a) if a.meeting_id == id => a,
        _ => return Ok(see_other(&form_path)),
    };
    session.remove(LAST_CHECKIN_KEY);

    let meeting = meeting::find_by_id(&pool, id, meeting::local_now())
        .await?
        .ok_or(AppError::NotFound)?;

    render(CheckInDoneTemplate {
        ctx: PublicContext::build(&session, &config),
        meeting,
        name: record.name,
        is_late: record.is_late,
        late_minutes: record.late_minutes,
        reset_delay_secs: config.attendance.form_reset_delay_secs,
    })
}
