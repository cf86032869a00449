use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::config::AppConfig;
use crate::errors::{AppError, see_other};
use crate::models::attendee::{self, CheckInForm, CheckInOutcome};
use crate::models::meeting;
use crate::realtime::{self, Hub};
use super::form::check_in_page;
use super::helpers::{validate_check_in, LAST_CHECKIN_KEY};

/// Keep typed identity fields, drop the heavy payloads the participant must redo.
fn for_retry(mut form: CheckInForm) -> CheckInForm {
    form.signature_data.clear();
    form.photo_proof.clear();
    form
}

/// POST /attend/{id}
pub async fn submit(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    hub: web::Data<Hub>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CheckInForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let now = meeting::local_now();

    let m = meeting::find_by_id(&pool, id, now)
        .await?
        .ok_or(AppError::NotFound)?;

    // signature replay is CPU-bound, keep it off the async worker
    let checked = {
        let (form, meeting, cfg) = (form.clone(), m.clone(), config.attendance.clone());
        web::block(move || validate_check_in(&form, &meeting, now, &cfg)).await
    };
    let new = match checked {
        Ok(Ok(new)) => new,
        Ok(Err(errors)) => return check_in_page(&session, &config, m, for_retry(form), errors),
        Err(e) => {
            log::error!("Check-in validation for meeting {id} did not complete: {e}");
            let msg = "Your attendance could not be saved. Please try again.".to_string();
            return check_in_page(&session, &config, m, for_retry(form), vec![msg]);
        }
    };

    let attendee_id = match attendee::create(&pool, &new).await {
        Ok(CheckInOutcome::Recorded(attendee_id)) => attendee_id,
        Ok(CheckInOutcome::Full) => {
            let msg = "This meeting has reached its maximum number of participants.".to_string();
            return check_in_page(&session, &config, m, for_retry(form), vec![msg]);
        }
        Ok(CheckInOutcome::Duplicate) => {
            let msg = format!("{} has already checked in to this meeting.", new.identifier);
            return check_in_page(&session, &config, m, for_retry(form), vec![msg]);
        }
        Err(e) => {
            log::error!("Failed to record attendance for meeting {id}: {e}");
            let msg = "Your attendance could not be saved. Please try again.".to_string();
            return check_in_page(&session, &config, m, for_retry(form), vec![msg]);
        }
    };

    let details = serde_json::json!({
        "meeting_id": id,
        "late_minutes": new.lateness.minutes(),
        "summary": format!("{} checked in to '{}'", new.name, m.title),
    });
    crate::audit::record(&pool, None, "attendance.checked_in", "attendee", attendee_id, details).await;

    match attendee::count_by_meeting(&pool, id).await {
        Ok(count) => realtime::notify_attendees_changed(&hub, id, count),
        Err(e) => log::warn!("Could not count attendees for meeting {id}: {e}"),
    }

    session
        .insert(LAST_CHECKIN_KEY, attendee_id)
        .map_err(|e| AppError::Session(e.to_string()))?;
    log::info!("Attendee {attendee_id} checked in to meeting {id}");
    Ok(see_other(&format!("/attend/{id}/done")))
}
