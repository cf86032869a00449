use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use hadir::auth::rate_limit::RateLimiter;
use hadir::config::AppConfig;
use hadir::realtime::{self, Hub};
use hadir::{db, errors, handlers};

/// Check-in posts carry a signature and an optional camera photo.
const FORM_LIMIT_BYTES: usize = 8 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
    db::bootstrap_admin(&pool, &config).await.map_err(std::io::Error::other)?;
    db::seed_employees(&pool).await.map_err(std::io::Error::other)?;

    match &config.attendance.geofence {
        Some(fence) => log::info!(
            "Geofence enabled: {:.0} m around ({}, {})",
            fence.radius_meters, fence.center.lat, fence.center.lng
        ),
        None => log::info!("Geofence disabled"),
    }

    let hub = Hub::new();
    realtime::scheduler::spawn_scheduler(pool.clone(), hub.clone(), config.status_refresh_secs);

    // Session encryption key; load from SESSION_KEY for sessions that survive restarts
    let secret_key = match &config.session_key {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = config.bind_addr.clone();
    let cookie_secure = config.cookie_secure;
    let pool_data = web::Data::new(pool);
    let config_data = web::Data::new(config);
    let hub_data = web::Data::new(hub);
    let limiter_data = web::Data::new(RateLimiter::default());

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(pool_data.clone())
            .app_data(config_data.clone())
            .app_data(hub_data.clone())
            .app_data(limiter_data.clone())
            .app_data(web::FormConfig::default().limit(FORM_LIMIT_BYTES))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async { errors::not_found_page() }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
