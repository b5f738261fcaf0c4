//! Sign ingresses and retrograde stations from two consecutive charts.

use crate::chart::Chart;
use crate::ephemeris::{Body, PlanetPosition};
use crate::events::types::{Ingress, Station, StationKind};
use crate::western::signs::SIGN_WIDTH;

/// Degrees covered inside the current sign: measured from the sign's start
/// for direct motion and from its end for retrograde entry.
pub fn degrees_traveled(position: &PlanetPosition) -> f64 {
    if position.is_retrograde {
        SIGN_WIDTH - position.degree_in_sign
    } else {
        position.degree_in_sign
    }
}

/// Bodies (except the Moon) whose sign differs between the two charts.
///
/// The event is dated on `current`'s day.
pub fn ingresses_between(previous: &Chart, current: &Chart) -> Vec<Ingress> {
    let date = current.instant.date_naive();
    current
        .iter()
        .filter(|p| p.body != Body::Moon)
        .filter_map(|now| {
            let before = previous.get(now.body)?;
            (before.sign != now.sign).then(|| Ingress {
                body: now.body,
                date,
                sign: now.sign,
                previous_sign: before.sign,
                longitude: now.longitude,
                degrees_traveled: degrees_traveled(now),
                is_retrograde: now.is_retrograde,
                house: None,
            })
        })
        .collect()
}

/// Bodies whose retrograde flag flipped between the two charts
pub fn stations_between(previous: &Chart, current: &Chart) -> Vec<Station> {
    let date = current.instant.date_naive();
    current
        .iter()
        .filter_map(|now| {
            let before = previous.get(now.body)?;
            (before.is_retrograde != now.is_retrograde).then(|| Station {
                body: now.body,
                date,
                phase: if now.is_retrograde {
                    StationKind::Retrograde
                } else {
                    StationKind::Direct
                },
                longitude: now.longitude,
                sign: now.sign,
                house: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::western::Sign;
    use chrono::{TimeZone, Utc};

    fn chart(day: u32, positions: &[(Body, f64, bool)]) -> Chart {
        Chart::from_positions(
            Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            positions
                .iter()
                .map(|&(body, lon, retro)| PlanetPosition::new(body, lon, retro))
                .collect(),
        )
    }

    #[test]
    fn test_direct_ingress() {
        let prev = chart(19, &[(Body::Sun, 359.4, false)]);
        let curr = chart(20, &[(Body::Sun, 0.375, false)]);
        let ingresses = ingresses_between(&prev, &curr);
        assert_eq!(ingresses.len(), 1);
        assert_eq!(ingresses[0].sign, Sign::Aries);
        assert_eq!(ingresses[0].previous_sign, Sign::Pisces);
        assert!((ingresses[0].degrees_traveled - 0.375).abs() < 1e-9);
        assert_eq!(ingresses[0].date.to_string(), "2024-03-20");
    }

    #[test]
    fn test_retrograde_ingress_measures_from_sign_end() {
        let prev = chart(1, &[(Body::Mercury, 30.2, true)]);
        let curr = chart(2, &[(Body::Mercury, 29.5, true)]);
        let ingresses = ingresses_between(&prev, &curr);
        assert_eq!(ingresses[0].sign, Sign::Aries);
        assert!((ingresses[0].degrees_traveled - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_moon_and_unchanged_bodies_skipped() {
        let prev = chart(1, &[(Body::Moon, 29.0, false), (Body::Venus, 40.0, false)]);
        let curr = chart(2, &[(Body::Moon, 42.0, false), (Body::Venus, 41.2, false)]);
        assert!(ingresses_between(&prev, &curr).is_empty());
    }

    #[test]
    fn test_same_chart_has_no_events() {
        let c = chart(1, &[(Body::Sun, 10.0, false), (Body::Mars, 200.0, true)]);
        assert!(ingresses_between(&c, &c).is_empty());
        assert!(stations_between(&c, &c).is_empty());
    }

    #[test]
    fn test_stations() {
        let prev = chart(1, &[(Body::Mars, 200.0, false), (Body::Saturn, 340.0, true)]);
        let curr = chart(2, &[(Body::Mars, 200.01, true), (Body::Saturn, 340.0, false)]);
        let stations = stations_between(&prev, &curr);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].body, Body::Mars);
        assert_eq!(stations[0].phase, StationKind::Retrograde);
        assert_eq!(stations[1].phase, StationKind::Direct);
    }
}
