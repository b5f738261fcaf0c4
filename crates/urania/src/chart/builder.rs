use chrono::{DateTime, Utc};
use log::debug;

use crate::chart::types::Chart;
use crate::ephemeris::{Body, EphemerisBackend, GeoPositionProvider};
use crate::error::ChartError;

/// Assembles every body position for an instant into a [`Chart`].
///
/// A failing body aborts the whole chart; no default position is ever
/// substituted.
pub struct ChartBuilder<'a, B: EphemerisBackend> {
    provider: &'a GeoPositionProvider<B>,
    bodies: Vec<Body>,
}

impl<'a, B: EphemerisBackend> ChartBuilder<'a, B> {
    /// Builder for all twelve bodies
    pub fn new(provider: &'a GeoPositionProvider<B>) -> Self {
        Self {
            provider,
            bodies: Body::ALL.to_vec(),
        }
    }

    /// Restrict computation to a subset of bodies
    pub fn with_bodies(mut self, bodies: &[Body]) -> Self {
        self.bodies = bodies.to_vec();
        self
    }

    pub fn build(&self, instant: DateTime<Utc>) -> Result<Chart, ChartError> {
        let positions = self
            .bodies
            .iter()
            .map(|&body| {
                self.provider
                    .position(body, instant)
                    .map_err(ChartError::ephemeris(body))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("built chart for {} with {} bodies", instant, positions.len());
        Ok(Chart::from_positions(instant, positions))
    }
}
