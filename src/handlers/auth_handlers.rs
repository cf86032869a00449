use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::{csrf, password, rate_limit::RateLimiter, session as auth_session};
use crate::config::AppConfig;
use crate::errors::{AppError, render, see_other};
use crate::handlers::meeting_handlers::CsrfOnly;
use crate::models::user;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

fn login_page_with(session: &Session, config: &AppConfig, username: &str, error: Option<&str>) -> Result<HttpResponse, AppError> {
    render(LoginTemplate {
        error: error.map(String::from),
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        username: username.to_string(),
    })
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let logged_in = auth_session::get_user_id(&session).is_some()
        && !auth_session::is_expired(auth_session::get_login_at(&session), now, config.session_ttl_minutes);
    if logged_in {
        return Ok(see_other("/admin"));
    }
    login_page_with(&session, &config, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check BEFORE any database access
    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Login blocked for {ip}: too many failed attempts");
        return login_page_with(
            &session,
            &config,
            &form.username,
            Some("Too many failed login attempts. Please try again later."),
        );
    }

    let found = user::find_by_username(&pool, &form.username).await?;
    let verified = match &found {
        Some(u) => password::verify_password(&form.password, &u.password_hash)?,
        None => false,
    };

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            auth_session::start(&session, &u, Utc::now())?;
            crate::audit::record(
                &pool,
                Some(u.id),
                "user.login",
                "user",
                u.id,
                serde_json::json!({ "summary": format!("'{}' signed in", u.username) }),
            )
            .await;
            Ok(see_other("/admin"))
        }
        _ => {
            limiter.record_failure(ip);
            log::info!("Failed login for '{}' from {ip}", form.username.trim());
            login_page_with(&session, &config, &form.username, Some("Invalid username or password"))
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
