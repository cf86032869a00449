use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{NaiveDateTime, Timelike};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::models::dashboard::MeetingStats;
use crate::models::meeting::{self, filter_options, local_now, MeetingFilter, MeetingStatus};
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(username: &str, now: NaiveDateTime) -> String {
    let period = match now.hour() {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, username)
}

/// GET /admin: stats over all meetings, then the filtered table.
pub async fn index(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let now = local_now();
    let ctx = PageContext::build(&session, &config, "/admin");

    let all = meeting::find_all(&pool, now).await?;
    let stats = MeetingStats::compute(&all, now.date());
    let (leaders, locations) = filter_options(&all);

    let filter = MeetingFilter::from_query(&query);
    let meetings = filter.apply(&all, now.date());

    let recent_activity = crate::audit::find_recent(&pool, 8).await.unwrap_or_else(|e| {
        log::warn!("Could not load recent activity: {e}");
        vec![]
    });

    render(DashboardTemplate {
        greeting: time_greeting(&ctx.username, now),
        ctx,
        stats,
        meetings,
        filter_query: filter.to_query_string(),
        filter,
        leaders,
        locations,
        statuses: MeetingStatus::ALL.to_vec(),
        recent_activity,
    })
}
