//! Read-only employee directory used to pre-fill the check-in form.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

pub const SEARCH_LIMIT: i64 = 20;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub phone: String,
}

/// Seed file entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEmployee {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub phone: String,
}

/// Case-insensitive name search, alphabetical, at most `SEARCH_LIMIT` rows.
/// An empty query lists the first names in the directory.
pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Employee>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(query.trim()));
    sqlx::query_as::<_, Employee>(
        "SELECT id, name, email, position, phone FROM employees \
         WHERE name ILIKE $1 ESCAPE '\\' \
         ORDER BY lower(name) LIMIT $2",
    )
    .bind(pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Insert the seed list when the directory is empty. Returns the number inserted.
pub async fn seed_if_empty(pool: &PgPool, seed: &[SeedEmployee]) -> Result<usize, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for e in seed {
        sqlx::query("INSERT INTO employees (name, email, position, phone) VALUES ($1, $2, $3, $4)")
            .bind(e.name.trim())
            .bind(e.email.trim())
            .bind(e.position.trim())
            .bind(e.phone.trim())
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(seed.len())
}
