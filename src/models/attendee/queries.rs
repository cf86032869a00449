use sqlx::PgPool;

use super::types::*;

const SELECT_ATTENDEE: &str = "\
SELECT id, meeting_id, name, email, position, identifier, phone, checked_in_at, \
       is_late, late_minutes, signature, photo_proof, latitude, longitude, distance_meters \
FROM attendees";

/// Store a check-in unless the meeting is full or the identifier already checked in.
///
/// The meeting row is locked for the capacity test, so concurrent
/// submissions cannot push a meeting past `max_participants`.
pub async fn create(pool: &PgPool, new: &NewAttendee) -> Result<CheckInOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let capacity: Option<i32> = sqlx::query_scalar(
        "SELECT max_participants FROM meetings WHERE id = $1 FOR UPDATE",
    )
    .bind(new.meeting_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(sqlx::Error::RowNotFound)?;

    if let Some(max) = capacity {
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE meeting_id = $1")
            .bind(new.meeting_id)
            .fetch_one(&mut *tx)
            .await?;
        if taken >= i64::from(max) {
            return Ok(CheckInOutcome::Full);
        }
    }

    let inserted: Result<(i64,), sqlx::Error> = sqlx::query_as(
        "INSERT INTO attendees (meeting_id, name, email, position, identifier, phone, \
                                is_late, late_minutes, signature, photo_proof, \
                                latitude, longitude, distance_meters) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id",
    )
    .bind(new.meeting_id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.position)
    .bind(&new.identifier)
    .bind(&new.phone)
    .bind(new.lateness.is_late())
    .bind(new.lateness.minutes())
    .bind(new.signature.as_str())
    .bind(new.photo_proof.as_deref())
    .bind(new.location.map(|l| l.point.lat))
    .bind(new.location.map(|l| l.point.lng))
    .bind(new.location.map(|l| l.distance_meters))
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok((id,)) => {
            tx.commit().await?;
            Ok(CheckInOutcome::Recorded(id))
        }
        Err(e) if is_unique_violation(&e) => Ok(CheckInOutcome::Duplicate),
        Err(e) => Err(e),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

/// Attendance for one meeting in check-in order.
pub async fn find_by_meeting(pool: &PgPool, meeting_id: i64) -> Result<Vec<Attendee>, sqlx::Error> {
    let sql = format!("{SELECT_ATTENDEE} WHERE meeting_id = $1 ORDER BY checked_in_at, id");
    sqlx::query_as::<_, Attendee>(&sql)
        .bind(meeting_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Attendee>, sqlx::Error> {
    let sql = format!("{SELECT_ATTENDEE} WHERE id = $1");
    sqlx::query_as::<_, Attendee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_by_meeting(pool: &PgPool, meeting_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE meeting_id = $1")
        .bind(meeting_id)
        .fetch_one(pool)
        .await
}

