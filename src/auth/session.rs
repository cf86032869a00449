use actix_session::Session;
use chrono::{DateTime, Duration, Utc};

use crate::errors::AppError;
use crate::models::user::User;

const USER_ID: &str = "user_id";
const USERNAME: &str = "username";
const DISPLAY_NAME: &str = "display_name";
const LOGIN_AT: &str = "login_at";
const FLASH: &str = "flash";

/// Store a freshly authenticated administrator in the session.
pub fn start(session: &Session, user: &User, now: DateTime<Utc>) -> Result<(), AppError> {
    session.renew();
    let insert_err = |e: actix_session::SessionInsertError| AppError::Session(e.to_string());
    session.insert(USER_ID, user.id).map_err(insert_err)?;
    session.insert(USERNAME, &user.username).map_err(insert_err)?;
    session.insert(DISPLAY_NAME, user.shown_name()).map_err(insert_err)?;
    session.insert(LOGIN_AT, now.timestamp()).map_err(insert_err)?;
    Ok(())
}

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID).unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>(USERNAME) {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

/// Header name for the signed-in admin, falling back to the username.
pub fn get_display_name(session: &Session) -> String {
    session
        .get::<String>(DISPLAY_NAME)
        .unwrap_or(None)
        .filter(|s| !s.is_empty())
        .or_else(|| get_username(session).ok())
        .unwrap_or_default()
}

pub fn get_login_at(session: &Session) -> Option<i64> {
    session.get::<i64>(LOGIN_AT).unwrap_or(None)
}

/// A session without a login time, or older than `ttl_minutes`, is expired.
pub fn is_expired(login_at: Option<i64>, now: DateTime<Utc>, ttl_minutes: i64) -> bool {
    match login_at.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
        Some(at) => now - at > Duration::minutes(ttl_minutes),
        None => true,
    }
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_valid() {
        let now = Utc::now();
        assert!(!is_expired(Some(now.timestamp()), now, 480));
        assert!(!is_expired(Some((now - Duration::minutes(479)).timestamp()), now, 480));
    }

    #[test]
    fn old_session_is_expired() {
        let now = Utc::now();
        assert!(is_expired(Some((now - Duration::minutes(481)).timestamp()), now, 480));
    }

    #[test]
    fn missing_login_time_is_expired() {
        assert!(is_expired(None, Utc::now(), 480));
    }
}
