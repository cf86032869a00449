use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{get_user_id, set_flash};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::models::meeting::{self, MeetingForm};
use crate::realtime::{self, Hub};
use crate::templates_structs::{MeetingFormTemplate, PageContext};
use super::helpers;

fn form_page(ctx: PageContext, id: i64, form: MeetingForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    render(MeetingFormTemplate {
        ctx,
        form_action: format!("/meetings/{id}"),
        form_title: "Edit Meeting".to_string(),
        form,
        errors,
        meeting_id: Some(id),
    })
}

pub async fn edit_form(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let m = helpers::load_meeting(&pool, id).await?;
    let ctx = PageContext::build(&session, &config, "/meetings");
    form_page(ctx, id, MeetingForm::from_meeting(&m), vec![])
}

pub async fn update(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    hub: web::Data<Hub>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<MeetingForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();

    let new = match helpers::validate_meeting_form(&form) {
        Ok(new) => new,
        Err(errors) => {
            let ctx = PageContext::build(&session, &config, "/meetings");
            return form_page(ctx, id, form, errors);
        }
    };

    match meeting::update(&pool, id, &new, meeting::local_now()).await {
        Ok(true) => {
            let details = serde_json::json!({
                "cancelled": new.cancelled,
                "summary": format!("Updated meeting '{}'", new.title),
            });
            crate::audit::record(&pool, get_user_id(&session), "meeting.updated", "meeting", id, details).await;
            realtime::notify_schedule_changed(&hub, id);

            set_flash(&session, "Meeting updated successfully");
            Ok(see_other("/admin"))
        }
        Ok(false) => Err(AppError::NotFound),
        Err(e) => {
            log::error!("Failed to update meeting {id}: {e}");
            let ctx = PageContext::build(&session, &config, "/meetings");
            form_page(ctx, id, form, vec!["The meeting could not be saved. Please try again.".to_string()])
        }
    }
}
