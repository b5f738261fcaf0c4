pub mod aspects;
pub mod cadence;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod western;

pub use aspects::{AspectCalculator, AspectContext, AspectResult, AspectType, OrbPolicy};
pub use chart::{BodyFilter, Chart, ChartBuilder};
pub use ephemeris::{Body, GeoLocation, GeoPositionProvider, PlanetPosition};
pub use error::ChartError;
pub use events::{EventDetector, EventSettings, TemporalEvent, TransitCalendar};
pub use western::{HouseCalculator, HouseSystem, Sign};

use chrono::{DateTime, Utc};
use ephemeris::EphemerisBackend;

/// Compact one-line summary of the luminaries and ascendant, e.g.
/// `"SUN:120.50|MOON:45.20|ASC:12.10"`
pub fn chart_summary<B: EphemerisBackend>(
    provider: &GeoPositionProvider<B>,
    instant: DateTime<Utc>,
    location: &GeoLocation,
) -> Result<String, ChartError> {
    let chart = ChartBuilder::new(provider)
        .with_bodies(&[Body::Sun, Body::Moon])
        .build(instant)?;
    let asc = western::ascendant(instant, location)?;
    Ok(format!(
        "SUN:{:.2}|MOON:{:.2}|ASC:{:.2}",
        chart.require(Body::Sun)?.longitude,
        chart.require(Body::Moon)?.longitude,
        asc.longitude
    ))
}
