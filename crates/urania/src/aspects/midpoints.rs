//! Midpoints of natal body pairs.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::ephemeris::{normalize_degrees, signed_difference, Body};

/// The midpoint of two bodies on the shorter arc between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Midpoint {
    pub first: Body,
    pub second: Body,
    pub longitude: f64,
}

/// Shorter-arc midpoint of two longitudes.
///
/// Points exactly opposite resolve to `a + 90°`.
pub fn midpoint_longitude(a: f64, b: f64) -> f64 {
    normalize_degrees(a + signed_difference(a, b) / 2.0)
}

/// Midpoints of every unordered pair in the chart except the node axis
pub fn chart_midpoints(chart: &Chart) -> Vec<Midpoint> {
    let positions = chart.positions();
    let mut midpoints = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if a.body.is_node() && b.body.is_node() {
                continue;
            }
            midpoints.push(Midpoint {
                first: a.body,
                second: b.body,
                longitude: midpoint_longitude(a.longitude, b.longitude),
            });
        }
    }
    midpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::PlanetPosition;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_midpoint_takes_shorter_arc() {
        assert!((midpoint_longitude(10.0, 50.0) - 30.0).abs() < 1e-9);
        assert!((midpoint_longitude(350.0, 20.0) - 5.0).abs() < 1e-9);
        assert!((midpoint_longitude(20.0, 350.0) - 5.0).abs() < 1e-9);
        assert!((midpoint_longitude(0.0, 180.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_midpoints_skip_node_axis() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let chart = Chart::from_positions(
            instant,
            vec![
                PlanetPosition::new(Body::Sun, 10.0, false),
                PlanetPosition::new(Body::Moon, 50.0, false),
                PlanetPosition::new(Body::NorthNode, 100.0, true),
                PlanetPosition::new(Body::SouthNode, 280.0, true),
            ],
        );
        let midpoints = chart_midpoints(&chart);
        // 4 bodies give 6 pairs, minus the node axis
        assert_eq!(midpoints.len(), 5);
        assert!(!midpoints
            .iter()
            .any(|m| m.first == Body::NorthNode && m.second == Body::SouthNode));
        assert_eq!(midpoints[0].first, Body::Sun);
        assert_eq!(midpoints[0].second, Body::Moon);
    }
}
