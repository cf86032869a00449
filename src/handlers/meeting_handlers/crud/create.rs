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

fn form_page(ctx: PageContext, form: MeetingForm, errors: Vec<String>) -> Result<HttpResponse, AppError> {
    render(MeetingFormTemplate {
        ctx,
        form_action: "/meetings".to_string(),
        form_title: "New Meeting".to_string(),
        form,
        errors,
        meeting_id: None,
    })
}

pub async fn new_form(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &config, "/meetings");
    form_page(ctx, MeetingForm::default(), vec![])
}

pub async fn create(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    hub: web::Data<Hub>,
    session: Session,
    form: web::Form<MeetingForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let new = match helpers::validate_meeting_form(&form) {
        Ok(new) => new,
        Err(errors) => {
            let ctx = PageContext::build(&session, &config, "/meetings");
            return form_page(ctx, form, errors);
        }
    };

    match meeting::create(&pool, &new, meeting::local_now()).await {
        Ok(meeting_id) => {
            let details = serde_json::json!({
                "date": new.date.to_string(),
                "summary": format!("Created meeting '{}'", new.title),
            });
            crate::audit::record(&pool, get_user_id(&session), "meeting.created", "meeting", meeting_id, details).await;
            realtime::notify_schedule_changed(&hub, meeting_id);

            set_flash(&session, "Meeting created successfully");
            Ok(see_other("/admin"))
        }
        Err(e) => {
            log::error!("Failed to create meeting: {e}");
            let ctx = PageContext::build(&session, &config, "/meetings");
            form_page(ctx, form, vec!["The meeting could not be saved. Please try again.".to_string()])
        }
    }
}
