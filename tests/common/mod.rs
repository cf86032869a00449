//! Shared test infrastructure for database-backed tests.
//!
//! Each `TestDb` lives in its own Postgres schema, created from
//! `DATABASE_URL` and dropped again when the value goes out of scope.
//! Tests that need it are `#[ignore]`d; run them with
//! `cargo test -- --ignored` against a reachable Postgres.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use hadir::models::attendee::{Lateness, NewAttendee};
use hadir::models::meeting::NewMeeting;
use hadir::signature::Signature;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin-test-pass";

pub struct TestDb {
    pool: PgPool,
    url: String,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let url = self.url.clone();
        let schema = self.schema.clone();
        let _ = std::thread::spawn(move || {
            let Ok(rt) = tokio::runtime::Builder::new_current_thread().enable_all().build() else {
                return;
            };
            rt.block_on(async {
                if let Ok(pool) = PgPoolOptions::new().max_connections(1).connect(&url).await {
                    let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {schema} CASCADE"))
                        .execute(&pool)
                        .await;
                }
            });
        })
        .join();
    }
}

/// Fresh, migrated schema. Panics when no database is configured.
pub async fn setup_test_db() -> TestDb {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .expect("DATABASE_URL must point at Postgres to run database tests");

    let schema = format!("test_{}", hex::encode(rand::random::<[u8; 6]>()));
    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to DATABASE_URL");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");
    admin.close().await;

    let options = PgConnectOptions::from_str(&url)
        .expect("Invalid DATABASE_URL")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to open test pool");
    hadir::db::run_migrations(&pool).await.expect("Failed to run migrations");

    TestDb { pool, url, schema }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

pub fn new_meeting(title: &str, on: &str, start: &str, end: Option<&str>) -> NewMeeting {
    NewMeeting {
        title: title.to_string(),
        date: date(on),
        start_time: time(start),
        end_time: end.map(time),
        location: "Hall A".to_string(),
        leader: "Dewi".to_string(),
        description: String::new(),
        notes: String::new(),
        max_participants: None,
        cancelled: false,
    }
}

pub fn new_attendee(meeting_id: i64, identifier: &str, late_by: i64) -> NewAttendee {
    let start = date("2025-06-01").and_time(time("09:00"));
    NewAttendee {
        meeting_id,
        name: format!("Participant {identifier}"),
        email: format!("{}@example.go.id", identifier.to_lowercase()),
        position: "Staff".to_string(),
        identifier: identifier.to_string(),
        phone: "081200000000".to_string(),
        lateness: Lateness::compute(start, start + Duration::minutes(late_by)),
        signature: Signature::from_png(&[0x89, b'P', b'N', b'G']),
        photo_proof: None,
        location: None,
    }
}
