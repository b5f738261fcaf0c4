use chrono::{Duration, NaiveDate};
use log::{debug, info};

use crate::ephemeris::EphemerisBackend;
use crate::error::ChartError;
use crate::events::detector::EventDetector;
use crate::events::types::{LunationKind, TemporalEvent};

/// Multi-day event scan over an [`EventDetector`].
///
/// Sampling reports a lunation on every day the luminaries stay within orb,
/// so a run of consecutive days with the same lunation kind is reduced to the
/// day with the tightest orb.
pub struct TransitCalendar<'a, B: EphemerisBackend> {
    detector: EventDetector<'a, B>,
}

impl<'a, B: EphemerisBackend> TransitCalendar<'a, B> {
    pub fn new(detector: EventDetector<'a, B>) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &EventDetector<'a, B> {
        &self.detector
    }

    /// Events for every day in `start..=end`, in date order
    pub fn scan(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TemporalEvent>, ChartError> {
        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            days.push((date, self.detector.detect(date)?));
            date += Duration::days(1);
        }
        info!("scanned {} days from {}", days.len(), start);
        Ok(dedupe_lunations(days))
    }
}

fn day_lunation(events: &[TemporalEvent]) -> Option<(LunationKind, f64)> {
    events
        .iter()
        .filter_map(TemporalEvent::as_lunation)
        .map(|l| (l.kind, l.orb))
        .next()
}

/// Keep only the tightest day of each run of consecutive same-kind lunation
/// days; eclipse aspects follow their lunation.
pub fn dedupe_lunations(days: Vec<(NaiveDate, Vec<TemporalEvent>)>) -> Vec<TemporalEvent> {
    let lunations: Vec<Option<(LunationKind, f64)>> =
        days.iter().map(|(_, events)| day_lunation(events)).collect();

    let mut keep = vec![true; days.len()];
    let mut i = 0;
    while i < days.len() {
        let Some((kind, _)) = lunations[i] else {
            i += 1;
            continue;
        };
        let mut end = i;
        while end + 1 < days.len()
            && days[end + 1].0 == days[end].0 + Duration::days(1)
            && matches!(lunations[end + 1], Some((k, _)) if k == kind)
        {
            end += 1;
        }
        let mut best = i;
        for j in i..=end {
            if let (Some((_, orb)), Some((_, best_orb))) = (lunations[j], lunations[best]) {
                if orb < best_orb {
                    best = j;
                }
            }
        }
        for (j, flag) in keep.iter_mut().enumerate().take(end + 1).skip(i) {
            *flag = j == best;
        }
        if end > i {
            debug!("{} run {}..={} resolved to {}", kind, days[i].0, days[end].0, days[best].0);
        }
        i = end + 1;
    }

    days.into_iter()
        .zip(keep)
        .flat_map(|((_, events), keep_lunation)| {
            events.into_iter().filter(move |event| {
                keep_lunation
                    || !matches!(event, TemporalEvent::Lunation(_) | TemporalEvent::EclipseAspect(_))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::AspectPhase;
    use crate::ephemeris::Body;
    use crate::events::types::{Ingress, Lunation};
    use crate::western::Sign;
    use chrono::{TimeZone, Utc};

    fn lunation(day: u32, kind: LunationKind, orb: f64) -> TemporalEvent {
        TemporalEvent::Lunation(Lunation {
            kind,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            instant: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            sun_longitude: 0.0,
            moon_longitude: orb,
            sign: Sign::Aries,
            orb,
            phase: AspectPhase::Applying,
            eclipse: None,
            house: None,
        })
    }

    fn ingress(day: u32) -> TemporalEvent {
        TemporalEvent::SignIngress(Ingress {
            body: Body::Venus,
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            sign: Sign::Taurus,
            previous_sign: Sign::Aries,
            longitude: 30.5,
            degrees_traveled: 0.5,
            is_retrograde: false,
            house: None,
        })
    }

    fn day(d: u32, events: Vec<TemporalEvent>) -> (NaiveDate, Vec<TemporalEvent>) {
        (NaiveDate::from_ymd_opt(2024, 5, d).unwrap(), events)
    }

    #[test]
    fn test_run_keeps_tightest_day() {
        let days = vec![
            day(6, vec![lunation(6, LunationKind::NewMoon, 4.0)]),
            day(7, vec![lunation(7, LunationKind::NewMoon, 0.8), ingress(7)]),
            day(8, vec![lunation(8, LunationKind::NewMoon, 3.5), ingress(8)]),
            day(9, vec![]),
        ];
        let events = dedupe_lunations(days);
        let lunations: Vec<&Lunation> = events.iter().filter_map(TemporalEvent::as_lunation).collect();
        assert_eq!(lunations.len(), 1);
        assert_eq!(lunations[0].date.to_string(), "2024-05-07");
        // other events on dropped days survive
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_separate_runs_and_kinds_kept() {
        let days = vec![
            day(1, vec![lunation(1, LunationKind::NewMoon, 1.0)]),
            day(2, vec![lunation(2, LunationKind::FullMoon, 1.0)]),
            day(4, vec![lunation(4, LunationKind::FullMoon, 2.0)]),
        ];
        assert_eq!(dedupe_lunations(days).len(), 3);
    }
}
