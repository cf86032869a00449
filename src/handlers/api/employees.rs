use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::employee;

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/employees?q= - Directory lookup for the check-in autocomplete.
pub async fn search(
    pool: web::Data<PgPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let employees = employee::search(&pool, &query.q).await?;
    Ok(HttpResponse::Ok().json(employees))
}
