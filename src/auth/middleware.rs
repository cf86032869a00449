use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use chrono::Utc;

use crate::auth::session;
use crate::config::{AppConfig, DEFAULT_SESSION_TTL_MINUTES};

/// Middleware function that checks for an authenticated, unexpired session.
/// Redirects to /login otherwise.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let ttl = req
        .app_data::<web::Data<AppConfig>>()
        .map(|c| c.session_ttl_minutes)
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);

    let s = req.get_session();
    let has_user = session::get_user_id(&s).is_some();
    let expired = session::is_expired(session::get_login_at(&s), Utc::now(), ttl);

    if !has_user || expired {
        if has_user {
            log::info!("Session expired for user {:?}", session::get_username(&s).ok());
            s.purge();
        }
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
