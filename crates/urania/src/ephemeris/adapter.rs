use crate::ephemeris::analytic::AnalyticEphemeris;
use crate::ephemeris::nodes::{mean_north_node, south_node_from};
use crate::ephemeris::time::{julian_centuries, julian_day};
use crate::ephemeris::types::{normalize_degrees, signed_difference, Body, PlanetPosition};
use chrono::{DateTime, Duration, Utc};
use log::debug;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Body {body} is not supported by the {backend} backend")]
    UnsupportedBody { body: Body, backend: String },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
}

/// A source of geocentric ecliptic longitudes for the Sun, Moon and planets.
///
/// Implementations may return any finite angle; the provider normalizes.
/// Lunar nodes never reach the backend.
pub trait EphemerisBackend {
    fn name(&self) -> &str;

    /// Geocentric ecliptic longitude in degrees at Julian Date `jd`
    fn ecliptic_longitude(&self, body: Body, jd: f64) -> Result<f64, EphemerisError>;
}

impl<B: EphemerisBackend + ?Sized> EphemerisBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ecliptic_longitude(&self, body: Body, jd: f64) -> Result<f64, EphemerisError> {
        (**self).ecliptic_longitude(body, jd)
    }
}

/// Time step of the retrograde finite difference
pub fn retrograde_probe() -> Duration {
    Duration::days(1)
}

/// Geo-position provider: normalized longitudes, analytic mean nodes and
/// the retrograde classifier on top of an ephemeris backend.
pub struct GeoPositionProvider<B = AnalyticEphemeris> {
    backend: B,
}

impl GeoPositionProvider<AnalyticEphemeris> {
    /// Provider backed by the built-in analytic ephemeris
    pub fn analytic() -> Self {
        Self::new(AnalyticEphemeris::new())
    }
}

impl Default for GeoPositionProvider<AnalyticEphemeris> {
    fn default() -> Self {
        Self::analytic()
    }
}

impl<B: EphemerisBackend> GeoPositionProvider<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Geocentric ecliptic longitude of `body` at `instant`, in [0, 360)
    pub fn longitude(&self, body: Body, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let jd = julian_day(instant);
        let raw = match body {
            Body::NorthNode => mean_north_node(julian_centuries(jd)),
            Body::SouthNode => south_node_from(mean_north_node(julian_centuries(jd))),
            _ => self.backend.ecliptic_longitude(body, jd)?,
        };
        if !raw.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                datetime: instant,
                message: format!("{} backend returned {}", self.backend.name(), raw),
            });
        }
        Ok(normalize_degrees(raw))
    }

    /// One-day forward difference; Sun and Moon are never retrograde
    pub fn is_retrograde(&self, body: Body, instant: DateTime<Utc>) -> Result<bool, EphemerisError> {
        if body.is_luminary() {
            return Ok(false);
        }
        let now = self.longitude(body, instant)?;
        self.moving_backward(body, now, instant)
    }

    fn moving_backward(&self, body: Body, now: f64, instant: DateTime<Utc>) -> Result<bool, EphemerisError> {
        if body.is_luminary() {
            return Ok(false);
        }
        let next = self.longitude(body, instant + retrograde_probe())?;
        Ok(is_retrograde_motion(now, next))
    }

    /// Full position of one body: longitude, sign, degree and motion
    pub fn position(&self, body: Body, instant: DateTime<Utc>) -> Result<PlanetPosition, EphemerisError> {
        let longitude = self.longitude(body, instant)?;
        let retrograde = self.moving_backward(body, longitude, instant)?;
        debug!(
            "{} at {}: {:.4}{}",
            body,
            instant,
            longitude,
            if retrograde { " R" } else { "" }
        );
        Ok(PlanetPosition::new(body, longitude, retrograde))
    }
}

/// Motion from `now` to `next` is retrograde iff the signed difference,
/// normalized to (−180, 180], is negative
pub fn is_retrograde_motion(now: f64, next: f64) -> bool {
    signed_difference(now, next) < 0.0
}
