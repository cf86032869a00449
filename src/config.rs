use std::collections::HashMap;

use crate::geofence::{Coordinate, Geofence};

/// Reference point used when `GEOFENCE_LAT` / `GEOFENCE_LNG` are not set.
pub const DEFAULT_GEOFENCE_LAT: f64 = -7.318_139_805_365_742;
pub const DEFAULT_GEOFENCE_LNG: f64 = 112.722_115_995_651_1;
pub const DEFAULT_GEOFENCE_RADIUS_M: f64 = 200.0;
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// Runtime configuration, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub app_name: String,
    /// Raw SESSION_KEY value; `None` means a random key is generated.
    pub session_key: Option<String>,
    pub session_ttl_minutes: i64,
    pub cookie_secure: bool,
    pub admin_username: String,
    pub admin_password: Option<String>,
    pub attendance: AttendanceConfig,
    pub status_refresh_secs: u64,
}

/// Settings that shape the check-in flow.
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    /// When set, check-in requires a location inside the fence.
    pub geofence: Option<Geofence>,
    pub require_photo: bool,
    pub opens_before_minutes: i64,
    pub form_reset_delay_secs: u64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            geofence: None,
            require_photo: false,
            opens_before_minutes: 30,
            form_reset_delay_secs: 3,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build a config from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL")
            .ok_or(ConfigError::Missing("DATABASE_URL"))?
            .to_string();

        let geofence_enabled = parse_or(vars, "GEOFENCE_ENABLED", false);
        let geofence = if geofence_enabled {
            Some(Geofence {
                center: Coordinate {
                    lat: parse_or(vars, "GEOFENCE_LAT", DEFAULT_GEOFENCE_LAT),
                    lng: parse_or(vars, "GEOFENCE_LNG", DEFAULT_GEOFENCE_LNG),
                },
                radius_meters: parse_or(vars, "GEOFENCE_RADIUS_M", DEFAULT_GEOFENCE_RADIUS_M),
            })
        } else {
            None
        };

        let attendance = AttendanceConfig {
            geofence,
            require_photo: parse_or(vars, "REQUIRE_PHOTO_PROOF", geofence_enabled),
            opens_before_minutes: parse_or(vars, "CHECKIN_OPENS_BEFORE_MINUTES", 30i64).max(0),
            form_reset_delay_secs: parse_or(vars, "FORM_RESET_DELAY_SECS", 3u64),
        };

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or("127.0.0.1:8080").to_string(),
            app_name: get("APP_NAME").unwrap_or("Hadir").to_string(),
            session_key: get("SESSION_KEY").map(String::from),
            session_ttl_minutes: parse_or(vars, "SESSION_TTL_MINUTES", DEFAULT_SESSION_TTL_MINUTES).max(1),
            cookie_secure: parse_or(vars, "COOKIE_SECURE", false),
            admin_username: get("ADMIN_USERNAME").unwrap_or("admin").to_string(),
            admin_password: get("ADMIN_PASSWORD").map(String::from),
            attendance,
            status_refresh_secs: parse_or(vars, "STATUS_REFRESH_SECS", 60u64).max(1),
        })
    }
}

/// Parse an optional variable, falling back to `default` (with a warning) on bad input.
fn parse_or<T: std::str::FromStr + Copy>(vars: &HashMap<String, String>, key: &str, default: T) -> T {
    match vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => default,
        Some(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Ignoring invalid {key}={raw:?}, using default");
                default
            }
        },
    }
}
