use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::password;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{employee, user};

const EMPLOYEE_SEED: &str = include_str!("../data/seed/employees.json");

pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Create the first administrator when the users table is empty.
///
/// Without `ADMIN_PASSWORD` a random password is generated and logged once.
pub async fn bootstrap_admin(pool: &PgPool, config: &AppConfig) -> Result<(), AppError> {
    if user::count(pool).await? > 0 {
        return Ok(());
    }

    let (plain, generated) = match &config.admin_password {
        Some(p) => (p.clone(), false),
        None => (password::generate_password(), true),
    };
    let new = user::NewUser {
        username: config.admin_username.clone(),
        password_hash: password::hash_password(&plain)?,
        display_name: "Administrator".to_string(),
    };
    user::create(pool, &new).await?;

    if generated {
        log::warn!(
            "Created admin '{}' with generated password: {} (set ADMIN_PASSWORD to choose one)",
            new.username,
            plain
        );
    } else {
        log::info!("Created admin '{}'", new.username);
    }
    Ok(())
}

/// Load the bundled employee directory into an empty table.
pub async fn seed_employees(pool: &PgPool) -> Result<(), AppError> {
    let seed: Vec<employee::SeedEmployee> = match serde_json::from_str(EMPLOYEE_SEED) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Bad employee seed JSON: {e}");
            return Ok(());
        }
    };
    let created = employee::seed_if_empty(pool, &seed).await?;
    if created > 0 {
        log::info!("Seed employees: created={created}");
    }
    Ok(())
}
