use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::debug;

use crate::aspects::AspectCalculator;
use crate::chart::{Chart, ChartBuilder};
use crate::ephemeris::{time::instant_on, Body, EphemerisBackend, GeoPositionProvider};
use crate::error::ChartError;
use crate::events::ingress::{ingresses_between, stations_between};
use crate::events::lunation::{eclipse_longitude, find_lunations, LuminarySample};
use crate::events::settings::EventSettings;
use crate::events::types::{EclipseAspect, TemporalEvent};
use crate::western::house_number;

/// Finds the lunations, eclipses, ingresses and stations of a single day
pub struct EventDetector<'a, B: EphemerisBackend> {
    provider: &'a GeoPositionProvider<B>,
    settings: EventSettings,
    calculator: AspectCalculator,
    first_house: Option<f64>,
}

impl<'a, B: EphemerisBackend> EventDetector<'a, B> {
    pub fn new(provider: &'a GeoPositionProvider<B>, settings: EventSettings) -> Self {
        Self {
            provider,
            settings,
            calculator: AspectCalculator::default(),
            first_house: None,
        }
    }

    /// Tag events with the house of their longitude, counted from this
    /// first-house longitude
    pub fn with_first_house(mut self, longitude: f64) -> Self {
        self.first_house = Some(longitude);
        self
    }

    pub fn with_calculator(mut self, calculator: AspectCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn settings(&self) -> &EventSettings {
        &self.settings
    }

    fn house(&self, longitude: f64) -> Option<u8> {
        self.first_house.map(|first| house_number(longitude, first))
    }

    fn chart_at(&self, instant: DateTime<Utc>) -> Result<Chart, ChartError> {
        ChartBuilder::new(self.provider).build(instant)
    }

    fn luminary_sample(&self, date: NaiveDate, hour: u32) -> Result<LuminarySample, ChartError> {
        let instant = instant_on(date, hour);
        let longitude = |body: Body| {
            self.provider
                .longitude(body, instant)
                .map_err(ChartError::ephemeris(body))
        };
        Ok(LuminarySample {
            instant,
            sun: longitude(Body::Sun)?,
            moon: longitude(Body::Moon)?,
            north_node: longitude(Body::NorthNode)?,
            south_node: longitude(Body::SouthNode)?,
        })
    }

    /// New and full moons on `date`, each qualified eclipse followed by its
    /// aspects to the planets at the lunation instant
    pub fn lunations_on(&self, date: NaiveDate) -> Result<Vec<TemporalEvent>, ChartError> {
        let samples = self
            .settings
            .sample_hours
            .iter()
            .map(|&hour| self.luminary_sample(date, hour))
            .collect::<Result<Vec<_>, _>>()?;

        let mut events = Vec::new();
        for mut lunation in find_lunations(&samples, &self.settings) {
            lunation.house = self.house(lunation.moon_longitude);
            debug!("{}: {} orb {:.3}", date, lunation.kind, lunation.orb);
            let eclipse = lunation.eclipse;
            let instant = lunation.instant;
            let sun = lunation.sun_longitude;
            events.push(TemporalEvent::Lunation(lunation));

            if let Some(kind) = eclipse {
                let point = eclipse_longitude(kind, sun);
                let chart = self.chart_at(instant)?;
                events.extend(
                    self.calculator
                        .eclipse_to_planets(kind, point, &chart)
                        .into_iter()
                        .map(|aspect| {
                            TemporalEvent::EclipseAspect(EclipseAspect {
                                date,
                                eclipse: kind,
                                eclipse_longitude: point,
                                aspect,
                            })
                        }),
                );
            }
        }
        Ok(events)
    }

    /// Reference-instant charts for the day before `date` and `date` itself
    fn reference_charts(&self, date: NaiveDate) -> Result<(Chart, Chart), ChartError> {
        let hour = self.settings.reference_hour;
        let previous = self.chart_at(instant_on(date - Duration::days(1), hour))?;
        let current = self.chart_at(instant_on(date, hour))?;
        Ok((previous, current))
    }

    pub fn ingresses_on(&self, date: NaiveDate) -> Result<Vec<TemporalEvent>, ChartError> {
        let (previous, current) = self.reference_charts(date)?;
        Ok(self.ingress_events(&previous, &current))
    }

    pub fn stations_on(&self, date: NaiveDate) -> Result<Vec<TemporalEvent>, ChartError> {
        let (previous, current) = self.reference_charts(date)?;
        Ok(self.station_events(&previous, &current))
    }

    fn ingress_events(&self, previous: &Chart, current: &Chart) -> Vec<TemporalEvent> {
        ingresses_between(previous, current)
            .into_iter()
            .map(|mut ingress| {
                ingress.house = self.house(ingress.longitude);
                TemporalEvent::SignIngress(ingress)
            })
            .collect()
    }

    fn station_events(&self, previous: &Chart, current: &Chart) -> Vec<TemporalEvent> {
        stations_between(previous, current)
            .into_iter()
            .map(|mut station| {
                station.house = self.house(station.longitude);
                TemporalEvent::Station(station)
            })
            .collect()
    }

    /// Every event on `date`: lunations (with eclipse aspects), then
    /// ingresses, then stations
    pub fn detect(&self, date: NaiveDate) -> Result<Vec<TemporalEvent>, ChartError> {
        let mut events = self.lunations_on(date)?;
        let (previous, current) = self.reference_charts(date)?;
        events.extend(self.ingress_events(&previous, &current));
        events.extend(self.station_events(&previous, &current));
        debug!("{}: {} events", date, events.len());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::LunationKind;

    #[test]
    fn test_house_tagging() {
        let provider = GeoPositionProvider::analytic();
        let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let detector = EventDetector::new(&provider, EventSettings::default()).with_first_house(0.0);
        let events = detector.ingresses_on(date).unwrap();
        let sun = events
            .iter()
            .find_map(|e| match e {
                TemporalEvent::SignIngress(i) if i.body == Body::Sun => Some(i),
                _ => None,
            })
            .unwrap();
        assert_eq!(sun.house, Some(1));
    }

    #[test]
    fn test_quiet_day_has_no_lunation() {
        let provider = GeoPositionProvider::analytic();
        // first quarter moon
        let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let detector = EventDetector::new(&provider, EventSettings::default());
        assert!(detector.lunations_on(date).unwrap().is_empty());
    }

    #[test]
    fn test_plain_new_moon_has_no_eclipse_aspects() {
        let provider = GeoPositionProvider::analytic();
        // new moon with the nodes far from the Sun
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let detector = EventDetector::new(&provider, EventSettings::default());
        let events = detector.lunations_on(date).unwrap();

        assert_eq!(events.len(), 1);
        let lunation = events[0].as_lunation().unwrap();
        assert_eq!(lunation.kind, LunationKind::NewMoon);
        assert_eq!(lunation.eclipse, None);
        assert!(lunation.orb < 2.0, "orb = {}", lunation.orb);

        let all = detector.detect(date).unwrap();
        assert!(!all.iter().any(|e| matches!(e, TemporalEvent::EclipseAspect(_))));
    }
}
