pub mod attendees;
pub mod employees;
pub mod meetings;

use actix_session::SessionExt;
use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use chrono::Utc;

use crate::auth::session;
use crate::config::{AppConfig, DEFAULT_SESSION_TTL_MINUTES};

/// JSON error body shared by every API endpoint.
pub(crate) fn json_error(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message }))
}

/// Admin API guard. Answers 401 JSON instead of redirecting to the login page.
async fn require_api_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let ttl = req
        .app_data::<web::Data<AppConfig>>()
        .map(|c| c.session_ttl_minutes)
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);

    let s = req.get_session();
    let authed = session::get_user_id(&s).is_some()
        && !session::is_expired(session::get_login_at(&s), Utc::now(), ttl);

    if !authed {
        let response = json_error(actix_web::http::StatusCode::UNAUTHORIZED, "Authentication required");
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/employees", web::get().to(employees::search));
    cfg.service(
        web::scope("/meetings")
            .wrap(actix_web::middleware::from_fn(require_api_auth))
            .route("", web::get().to(meetings::list))
            .route("/{id}", web::get().to(meetings::read))
            .route("/{id}/attendees", web::get().to(attendees::list)),
    );
}
