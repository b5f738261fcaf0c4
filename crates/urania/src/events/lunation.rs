//! New and full moons from sampled luminary positions, and eclipse
//! qualification against the lunar nodes.

use chrono::{DateTime, Utc};

use crate::aspects::AspectPhase;
use crate::ephemeris::{angular_separation, normalize_degrees};
use crate::events::settings::EventSettings;
use crate::events::types::{EclipseKind, Lunation, LunationKind};
use crate::western::Sign;

/// Sun, Moon and node longitudes at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminarySample {
    pub instant: DateTime<Utc>,
    pub sun: f64,
    pub moon: f64,
    pub north_node: f64,
    pub south_node: f64,
}

/// Moon's elongation east of the Sun, in [0, 360)
pub fn moon_relative(sun: f64, moon: f64) -> f64 {
    normalize_degrees(moon - sun)
}

/// Distance from the exact lunation angle
pub fn lunation_orb(kind: LunationKind, sun: f64, moon: f64) -> f64 {
    let separation = angular_separation(sun, moon);
    match kind {
        LunationKind::NewMoon => separation,
        LunationKind::FullMoon => (separation - 180.0).abs(),
    }
}

/// Phase of a lunation from the Moon's elongation; exact when `orb <= exact_orb`
pub fn lunation_phase(kind: LunationKind, sun: f64, moon: f64, orb: f64, exact_orb: f64) -> AspectPhase {
    if orb <= exact_orb {
        return AspectPhase::Exact;
    }
    let relative = moon_relative(sun, moon);
    let applying = match kind {
        LunationKind::NewMoon => relative > 180.0,
        LunationKind::FullMoon => relative < 180.0,
    };
    if applying {
        AspectPhase::Applying
    } else {
        AspectPhase::Separating
    }
}

/// Eclipse kind, if a node is close enough to the relevant luminary
pub fn eclipse_kind(kind: LunationKind, sample: &LuminarySample, settings: &EventSettings) -> Option<EclipseKind> {
    let near = |target: f64, limit: f64| {
        angular_separation(sample.north_node, target) <= limit
            || angular_separation(sample.south_node, target) <= limit
    };
    match kind {
        LunationKind::NewMoon if near(sample.sun, settings.solar_node_limit) => Some(EclipseKind::Solar),
        LunationKind::FullMoon if near(sample.moon, settings.lunar_node_limit) => Some(EclipseKind::Lunar),
        _ => None,
    }
}

/// The sensitive point of an eclipse: the Sun for solar, the anti-Sun for lunar
pub fn eclipse_longitude(kind: EclipseKind, sun: f64) -> f64 {
    match kind {
        EclipseKind::Solar => normalize_degrees(sun),
        EclipseKind::Lunar => normalize_degrees(sun + 180.0),
    }
}

/// Lunations among one day's samples.
///
/// For each kind the sample with the smallest orb is the candidate; it is
/// reported when within `settings.lunation_orb`.
pub fn find_lunations(samples: &[LuminarySample], settings: &EventSettings) -> Vec<Lunation> {
    [LunationKind::NewMoon, LunationKind::FullMoon]
        .into_iter()
        .filter_map(|kind| {
            let (best, orb) = samples
                .iter()
                .map(|s| (s, lunation_orb(kind, s.sun, s.moon)))
                .fold(None, |best: Option<(&LuminarySample, f64)>, (s, orb)| match best {
                    Some((_, best_orb)) if best_orb <= orb => best,
                    _ => Some((s, orb)),
                })?;
            if orb > settings.lunation_orb {
                return None;
            }
            Some(Lunation {
                kind,
                date: best.instant.date_naive(),
                instant: best.instant,
                sun_longitude: best.sun,
                moon_longitude: best.moon,
                sign: Sign::from_longitude(best.moon),
                orb,
                phase: lunation_phase(kind, best.sun, best.moon, orb, settings.exact_orb),
                eclipse: eclipse_kind(kind, best, settings),
                house: None,
            })
        })
        .collect()
}
