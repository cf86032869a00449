use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{get_user_id, set_flash};
use crate::errors::{AppError, see_other};
use crate::models::meeting;
use crate::realtime::{self, Hub};
use super::forms::CsrfOnly;

/// Unconditional delete; attendance records cascade.
pub async fn delete(
    pool: web::Data<PgPool>,
    hub: web::Data<Hub>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if !meeting::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }

    let details = serde_json::json!({ "summary": format!("Deleted meeting #{id}") });
    crate::audit::record(&pool, get_user_id(&session), "meeting.deleted", "meeting", id, details).await;
    realtime::notify_schedule_changed(&hub, id);

    set_flash(&session, "Meeting deleted");
    Ok(see_other("/admin"))
}
