//! How often an aspect between two bodies recurs and how long it stays in orb,
//! from mean daily motions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::{AspectResult, AspectType};
use crate::ephemeris::Body;

const DAYS_PER_MONTH: f64 = 30.436875;
const DAYS_PER_YEAR: f64 = 365.25;

/// Mean geocentric motion in degrees per day
pub fn mean_daily_motion(body: Body) -> f64 {
    match body {
        Body::Sun => 0.9856,
        Body::Moon => 13.1764,
        Body::Mercury => 1.3833,
        Body::Venus => 1.2,
        Body::Mars => 0.524,
        Body::Jupiter => 0.0831,
        Body::Saturn => 0.0335,
        Body::Uranus => 0.0117,
        Body::Neptune => 0.006,
        Body::Pluto => 0.004,
        Body::NorthNode | Body::SouthNode => -0.053,
    }
}

/// Observed synodic periods in days
const SYNODIC_PERIODS: &[(Body, Body, f64)] = &[
    (Body::Sun, Body::Moon, 29.530589),
    (Body::Sun, Body::Mercury, 115.88),
    (Body::Sun, Body::Venus, 583.92),
    (Body::Sun, Body::Mars, 779.94),
    (Body::Sun, Body::Jupiter, 398.88),
    (Body::Sun, Body::Saturn, 378.09),
    (Body::Sun, Body::Uranus, 369.66),
    (Body::Sun, Body::Neptune, 367.49),
    (Body::Sun, Body::Pluto, 366.73),
    (Body::Jupiter, Body::Saturn, 7253.45),
];

fn relative_motion(a: Body, b: Body) -> Option<f64> {
    let delta = (mean_daily_motion(a) - mean_daily_motion(b)).abs();
    (delta > 0.0).then_some(delta)
}

/// Days between successive conjunctions of `a` and `b`.
///
/// Classical pairs use observed values; others use `360 / |m_a − m_b|`.
/// `None` when both bodies move at the same mean rate.
pub fn synodic_period(a: Body, b: Body) -> Option<f64> {
    SYNODIC_PERIODS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|&(_, _, days)| days)
        .or_else(|| relative_motion(a, b).map(|delta| 360.0 / delta))
}

/// Days between successive occurrences of `aspect`
pub fn recurrence_interval(a: Body, b: Body, aspect: AspectType) -> Option<f64> {
    synodic_period(a, b).map(|period| period / aspect.occurrences_per_cycle() as f64)
}

/// Days the pair spends within `orb` of exact on each pass
pub fn duration_in_orb(a: Body, b: Body, orb: f64) -> Option<f64> {
    relative_motion(a, b).map(|delta| 2.0 * orb / delta)
}

/// Human-readable span: hours under a day, then days, months, years
pub fn describe_days(days: f64) -> String {
    if days < 1.0 {
        let hours = (days * 24.0).round().max(1.0);
        if hours == 1.0 {
            "~1 hour".to_string()
        } else {
            format!("~{hours:.0} hours")
        }
    } else if days < 60.0 {
        format!("~{days:.1} days")
    } else if days < 2.0 * DAYS_PER_YEAR {
        format!("~{:.1} months", days / DAYS_PER_MONTH)
    } else {
        format!("~{:.1} years", days / DAYS_PER_YEAR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectCadence {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect: AspectType,
    pub orb: f64,
    pub synodic_period_days: Option<f64>,
    pub recurrence_days: Option<f64>,
    pub duration_days: Option<f64>,
}

impl AspectCadence {
    pub fn estimate(body_a: Body, body_b: Body, aspect: AspectType, orb: f64) -> Self {
        Self {
            body_a,
            body_b,
            aspect,
            orb,
            synodic_period_days: synodic_period(body_a, body_b),
            recurrence_days: recurrence_interval(body_a, body_b, aspect),
            duration_days: duration_in_orb(body_a, body_b, orb),
        }
    }

    /// Cadence of a detected aspect between two bodies, using its orb limit
    pub fn for_result(result: &AspectResult) -> Option<Self> {
        Some(Self::estimate(
            result.point_a.body()?,
            result.point_b.body()?,
            result.aspect_type,
            result.orb_limit,
        ))
    }

    pub fn recurrence_text(&self) -> String {
        match self.recurrence_days {
            Some(days) => format!("every {}", describe_days(days)),
            None => "does not recur".to_string(),
        }
    }

    pub fn duration_text(&self) -> String {
        match self.duration_days {
            Some(days) => format!("in orb for {}", describe_days(days)),
            None => "stays in orb indefinitely".to_string(),
        }
    }
}

impl fmt::Display for AspectCadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {}, {}",
            self.body_a,
            self.aspect,
            self.body_b,
            self.recurrence_text(),
            self.duration_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabulated_periods_are_symmetric() {
        assert_eq!(synodic_period(Body::Sun, Body::Moon), Some(29.530589));
        assert_eq!(synodic_period(Body::Moon, Body::Sun), Some(29.530589));
        assert_eq!(synodic_period(Body::Saturn, Body::Jupiter), Some(7253.45));
    }

    #[test]
    fn test_derived_period() {
        let period = synodic_period(Body::Mars, Body::Jupiter).unwrap();
        assert!((period - 360.0 / (0.524 - 0.0831)).abs() < 1e-9);
        // nodes move retrograde, so relative motion adds up
        let period = synodic_period(Body::Pluto, Body::NorthNode).unwrap();
        assert!((period - 360.0 / 0.057).abs() < 1e-6);
    }

    #[test]
    fn test_identical_motion_has_no_period() {
        assert_eq!(synodic_period(Body::NorthNode, Body::SouthNode), None);
        assert_eq!(synodic_period(Body::Venus, Body::Venus), None);
        assert_eq!(duration_in_orb(Body::NorthNode, Body::SouthNode, 5.0), None);
    }

    #[test]
    fn test_recurrence_halves_for_minor_aspects() {
        let conj = recurrence_interval(Body::Sun, Body::Moon, AspectType::Conjunction).unwrap();
        let square = recurrence_interval(Body::Sun, Body::Moon, AspectType::Square).unwrap();
        assert!((conj - 2.0 * square).abs() < 1e-12);
    }

    #[test]
    fn test_describe_days() {
        assert_eq!(describe_days(29.530589), "~29.5 days");
        assert_eq!(describe_days(0.3), "~7 hours");
        assert_eq!(describe_days(0.01), "~1 hour");
        assert_eq!(describe_days(115.88), "~3.8 months");
        assert_eq!(describe_days(7253.45), "~19.9 years");
    }

    #[test]
    fn test_cadence_text() {
        let cadence = AspectCadence::estimate(Body::Sun, Body::Moon, AspectType::Conjunction, 2.0);
        assert_eq!(cadence.recurrence_text(), "every ~29.5 days");
        // 4° at 12.19°/day
        assert_eq!(cadence.duration_text(), "in orb for ~8 hours");
    }
}
