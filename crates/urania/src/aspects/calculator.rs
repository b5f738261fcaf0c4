use log::debug;
use std::collections::HashSet;

use crate::aspects::midpoints::chart_midpoints;
use crate::aspects::policy::OrbPolicy;
use crate::aspects::types::{AspectContext, AspectPhase, AspectPoint, AspectResult, AspectType};
use crate::chart::Chart;
use crate::ephemeris::{angular_separation, Body};
use crate::events::EclipseKind;

/// Orbs at or below this many degrees count as exact
pub const EXACT_ORB: f64 = 0.5;

/// Aspect direction from the orb alone.
///
/// This ignores the bodies' motion: anything tighter than half the limit is
/// called applying. Kept for compatibility with existing readings; do not
/// rely on it for timing.
pub fn aspect_direction(orb: f64, orb_limit: f64) -> AspectPhase {
    if orb <= EXACT_ORB {
        AspectPhase::Exact
    } else if orb < orb_limit / 2.0 {
        AspectPhase::Applying
    } else {
        AspectPhase::Separating
    }
}

/// Aspect detector over an orb policy
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    policy: OrbPolicy,
}

impl AspectCalculator {
    pub fn new(policy: OrbPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &OrbPolicy {
        &self.policy
    }

    /// Calculate the aspect between two points at the given longitudes.
    ///
    /// Aspects are tried in [`AspectType::SCAN_ORDER`]; the first within its
    /// orb limit wins.
    pub fn calculate_aspect(
        &self,
        context: AspectContext,
        point_a: AspectPoint,
        lon_a: f64,
        point_b: AspectPoint,
        lon_b: f64,
    ) -> Option<AspectResult> {
        let separation = angular_separation(lon_a, lon_b);

        AspectType::SCAN_ORDER.iter().find_map(|&aspect| {
            let orb_limit = self.policy.orb_limit(context, point_a, point_b, aspect)?;
            let orb = (separation - aspect.angle()).abs();
            (orb <= orb_limit).then(|| AspectResult {
                point_a,
                point_b,
                aspect_type: aspect,
                exact_angle: aspect.angle(),
                orb,
                orb_limit,
                context,
                direction: aspect_direction(orb, orb_limit),
            })
        })
    }

    /// Aspects among the bodies of one chart, each unordered pair once
    pub fn transit_to_transit(&self, chart: &Chart) -> Vec<AspectResult> {
        let positions = chart.positions();
        let mut aspects = Vec::new();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                if let Some(aspect) = self.calculate_aspect(
                    AspectContext::TransitToTransit,
                    a.body.into(),
                    a.longitude,
                    b.body.into(),
                    b.longitude,
                ) {
                    aspects.push(aspect);
                }
            }
        }
        debug!("transit-to-transit: {} aspects at {}", aspects.len(), chart.instant);
        aspects
    }

    /// Aspects from transiting bodies to natal bodies.
    ///
    /// `point_a` is the natal body and `point_b` the transiting one. A pair
    /// already reported in the other orientation is skipped.
    pub fn natal_to_transit(&self, natal: &Chart, transit: &Chart) -> Vec<AspectResult> {
        let mut seen: HashSet<(Body, Body)> = HashSet::new();
        let mut aspects = Vec::new();
        for n in natal.iter() {
            for t in transit.iter() {
                let key = if n.body <= t.body {
                    (n.body, t.body)
                } else {
                    (t.body, n.body)
                };
                if seen.contains(&key) {
                    continue;
                }
                if let Some(aspect) = self.calculate_aspect(
                    AspectContext::NatalToTransit,
                    n.body.into(),
                    n.longitude,
                    t.body.into(),
                    t.longitude,
                ) {
                    seen.insert(key);
                    aspects.push(aspect);
                }
            }
        }
        debug!("natal-to-transit: {} aspects at {}", aspects.len(), transit.instant);
        aspects
    }

    /// Aspects from transiting bodies to the midpoints of natal pairs
    pub fn natal_to_midpoints(&self, natal: &Chart, transit: &Chart) -> Vec<AspectResult> {
        let mut aspects = Vec::new();
        for midpoint in chart_midpoints(natal) {
            let point = AspectPoint::Midpoint(midpoint.first, midpoint.second);
            for t in transit.iter() {
                if let Some(aspect) = self.calculate_aspect(
                    AspectContext::NatalToMidpoint,
                    point,
                    midpoint.longitude,
                    t.body.into(),
                    t.longitude,
                ) {
                    aspects.push(aspect);
                }
            }
        }
        debug!("natal-to-midpoint: {} aspects at {}", aspects.len(), transit.instant);
        aspects
    }

    /// Aspects from an eclipse point to every non-luminary body in the chart
    pub fn eclipse_to_planets(
        &self,
        kind: EclipseKind,
        eclipse_longitude: f64,
        chart: &Chart,
    ) -> Vec<AspectResult> {
        chart
            .iter()
            .filter(|p| !p.body.is_luminary())
            .filter_map(|p| {
                self.calculate_aspect(
                    AspectContext::EclipseToPlanet,
                    AspectPoint::Eclipse(kind),
                    eclipse_longitude,
                    p.body.into(),
                    p.longitude,
                )
            })
            .collect()
    }
}
