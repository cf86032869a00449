//! Great-circle distance and the check-in geofence.

use serde::Serialize;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Returns `None` for coordinates outside the valid latitude/longitude range.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// Haversine distance in meters.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// A circle around a fixed reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geofence {
    pub center: Coordinate,
    pub radius_meters: f64,
}

/// Outcome of a location check, shown to the participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofenceResult {
    pub valid: bool,
    pub distance_meters: Option<f64>,
    pub message: String,
}

impl Geofence {
    pub fn check(&self, point: Coordinate) -> GeofenceResult {
        let distance = haversine_meters(point, self.center);
        let valid = distance <= self.radius_meters;
        let message = if valid {
            format!("Location verified ({:.0} m from the venue).", distance)
        } else {
            format!(
                "You are {:.0} m from the venue. Check-in is only possible within {:.0} m.",
                distance, self.radius_meters
            )
        };
        GeofenceResult {
            valid,
            distance_meters: Some(distance),
            message,
        }
    }
}

impl GeofenceResult {
    /// The browser could not provide a position (denied, unsupported, timed out).
    pub fn unavailable(reason: &str) -> Self {
        let message = match reason {
            "unsupported" => "This browser does not support geolocation.".to_string(),
            "denied" => "Location permission was denied. Enable location access and try again.".to_string(),
            _ => "Unable to determine your location. Make sure location access is enabled.".to_string(),
        };
        Self {
            valid: false,
            distance_meters: None,
            message,
        }
    }
}
