use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::meeting::{self, filter_options, local_now, MeetingFilter, MeetingStatus};
use crate::templates_structs::{ParticipantListTemplate, PublicContext};

/// GET /: every meeting, ongoing first, narrowed by the query filter.
pub async fn list(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let now = local_now();
    let all = meeting::find_for_participants(&pool, now).await?;
    let filter = MeetingFilter::from_query(&query);
    let (leaders, locations) = filter_options(&all);

    render(ParticipantListTemplate {
        ctx: PublicContext::build(&session, &config),
        meetings: filter.apply(&all, now.date()),
        filter,
        leaders,
        locations,
        statuses: MeetingStatus::ALL.to_vec(),
    })
}
