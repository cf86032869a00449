use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::PgPool;

use super::status::MeetingStatus;
use super::types::*;

#[derive(sqlx::FromRow)]
struct Row {
    id: i64,
    title: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: Option<NaiveTime>,
    location: String,
    leader: String,
    description: String,
    notes: String,
    max_participants: Option<i32>,
    status: String,
    attendee_count: i64,
    created_at: DateTime<Utc>,
}

const SELECT_MEETING: &str = "\
SELECT m.id, m.title, m.date, m.start_time, m.end_time, m.location, m.leader, \
       m.description, m.notes, m.max_participants, m.status, m.created_at, \
       (SELECT COUNT(*) FROM attendees a WHERE a.meeting_id = m.id) AS attendee_count \
FROM meetings m";

fn into_meeting(row: Row, now: NaiveDateTime) -> Meeting {
    let stored = MeetingStatus::parse(&row.status).unwrap_or(MeetingStatus::Scheduled);
    let mut meeting = Meeting {
        id: row.id,
        title: row.title,
        date: row.date,
        start_time: row.start_time,
        end_time: row.end_time,
        location: row.location,
        leader: row.leader,
        description: row.description,
        notes: row.notes,
        max_participants: row.max_participants,
        cancelled: stored == MeetingStatus::Cancelled,
        status: stored,
        attendee_count: row.attendee_count,
        created_at: row.created_at,
    };
    meeting.refresh_status(now);
    meeting
}

/// All meetings, newest date first, with effective status evaluated at `now`.
pub async fn find_all(pool: &PgPool, now: NaiveDateTime) -> Result<Vec<Meeting>, sqlx::Error> {
    let sql = format!("{SELECT_MEETING} ORDER BY m.date DESC, m.start_time DESC");
    let rows = sqlx::query_as::<_, Row>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| into_meeting(r, now)).collect())
}

/// Participant-facing ordering: ongoing first, then scheduled, completed, cancelled.
/// Within a group, soonest first.
pub async fn find_for_participants(pool: &PgPool, now: NaiveDateTime) -> Result<Vec<Meeting>, sqlx::Error> {
    let mut meetings = find_all(pool, now).await?;
    meetings.sort_by(|a, b| {
        a.status
            .sort_rank()
            .cmp(&b.status.sort_rank())
            .then(a.date.cmp(&b.date))
            .then(a.start_time.cmp(&b.start_time))
    });
    Ok(meetings)
}

pub async fn find_by_id(pool: &PgPool, id: i64, now: NaiveDateTime) -> Result<Option<Meeting>, sqlx::Error> {
    let sql = format!("{SELECT_MEETING} WHERE m.id = $1");
    let row = sqlx::query_as::<_, Row>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| into_meeting(r, now)))
}

pub async fn create(pool: &PgPool, new: &NewMeeting, now: NaiveDateTime) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO meetings (title, date, start_time, end_time, location, leader, \
                               description, notes, max_participants, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
    )
    .bind(&new.title)
    .bind(new.date)
    .bind(new.start_time)
    .bind(new.end_time)
    .bind(&new.location)
    .bind(&new.leader)
    .bind(&new.description)
    .bind(&new.notes)
    .bind(new.max_participants)
    .bind(new.stored_status(now).as_str())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Overwrite every editable field. Returns false when the meeting no longer exists.
pub async fn update(pool: &PgPool, id: i64, new: &NewMeeting, now: NaiveDateTime) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE meetings SET title = $1, date = $2, start_time = $3, end_time = $4, \
                location = $5, leader = $6, description = $7, notes = $8, \
                max_participants = $9, status = $10 \
         WHERE id = $11",
    )
    .bind(&new.title)
    .bind(new.date)
    .bind(new.start_time)
    .bind(new.end_time)
    .bind(&new.location)
    .bind(&new.leader)
    .bind(&new.description)
    .bind(&new.notes)
    .bind(new.max_participants)
    .bind(new.stored_status(now).as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a meeting; its attendance records go with it.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Write a derived status back. Cancelled rows are never touched.
pub async fn update_status(pool: &PgPool, id: i64, status: MeetingStatus) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE meetings SET status = $1 WHERE id = $2 AND status <> 'cancelled' AND status <> $1",
    )
    .bind(status.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Bring stored statuses in line with the clock. Returns the meetings that changed.
pub async fn refresh_statuses(pool: &PgPool, now: NaiveDateTime) -> Result<Vec<(i64, MeetingStatus)>, sqlx::Error> {
    let sql = format!("{SELECT_MEETING} WHERE m.status <> 'cancelled'");
    let rows = sqlx::query_as::<_, Row>(&sql).fetch_all(pool).await?;

    let mut changed = Vec::new();
    for row in rows {
        let was = MeetingStatus::parse(&row.status);
        let m = into_meeting(row, now);
        if was != Some(m.status) && update_status(pool, m.id, m.status).await? {
            changed.push((m.id, m.status));
        }
    }
    Ok(changed)
}
