pub mod api;
pub mod attendance_handlers;
pub mod auth_handlers;
pub mod dashboard;
pub mod meeting_handlers;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::auth::middleware::require_auth;

/// Register every application route. Fixed meeting paths come before `/meetings/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/", web::get().to(attendance_handlers::list))
        .route("/attend/{id}", web::get().to(attendance_handlers::form))
        .route("/attend/{id}", web::post().to(attendance_handlers::submit))
        .route("/attend/{id}/done", web::get().to(attendance_handlers::done))
        .route("/ws/schedule", web::get().to(attendance_handlers::schedule_ws))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .service(web::scope("/api").configure(api::configure))
        // Protected routes
        .service(
            web::resource("/admin")
                .wrap(from_fn(require_auth))
                .route(web::get().to(dashboard::index)),
        )
        .service(
            web::resource("/logout")
                .wrap(from_fn(require_auth))
                .route(web::post().to(auth_handlers::logout)),
        )
        .service(
            web::scope("/meetings")
                .wrap(from_fn(require_auth))
                .route("", web::post().to(meeting_handlers::create))
                .route("/new", web::get().to(meeting_handlers::new_form))
                .route("/export.csv", web::get().to(meeting_handlers::export_meetings_csv))
                .route("/print", web::get().to(meeting_handlers::print_meetings))
                .route("/{id}", web::get().to(meeting_handlers::detail))
                .route("/{id}", web::post().to(meeting_handlers::update))
                .route("/{id}/edit", web::get().to(meeting_handlers::edit_form))
                .route("/{id}/delete", web::post().to(meeting_handlers::delete))
                .route("/{id}/attendees.csv", web::get().to(meeting_handlers::export_attendees_csv))
                .route("/{id}/print", web::get().to(meeting_handlers::print_attendance))
                .route("/{id}/ws", web::get().to(meeting_handlers::detail_ws)),
        );
}
