use crate::ephemeris::{Body, EphemerisError};
use thiserror::Error;

/// Errors from chart, house and event computations
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid location: latitude {lat} must be within [-90, 90] and longitude {lon} within [-180, 180]")]
    InvalidLocation { lat: f64, lon: f64 },
    #[error("Latitude {lat} is polar; the ascendant is undefined at the poles")]
    PolarLatitude { lat: f64 },
    #[error("An observer location is required for an ascendant-based house reference")]
    MissingLocation,
    #[error("Chart has no position for {body}")]
    MissingBody { body: Body },
    #[error("{body}: {source}")]
    Ephemeris {
        body: Body,
        #[source]
        source: EphemerisError,
    },
}

impl ChartError {
    pub(crate) fn ephemeris(body: Body) -> impl FnOnce(EphemerisError) -> ChartError {
        move |source| ChartError::Ephemeris { body, source }
    }
}
