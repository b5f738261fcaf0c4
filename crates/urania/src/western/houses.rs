//! Ascendant, chart angles and house cusps.
//!
//! The ascendant follows the standard spherical-astronomy formula
//! `Asc = atan2(cos RAMC, −(sin RAMC·cos ε + tan φ·sin ε))` with RAMC equal to
//! the local sidereal time. Placidus is not implemented as such: the
//! `PlacidusSimplified` system uses equal-house cusps.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::chart::Chart;
use crate::ephemeris::time::{centuries_since_j2000, gmst_hours, local_sidereal_degrees, mean_obliquity};
use crate::ephemeris::{normalize_degrees, Body, GeoLocation, ParseError};
use crate::error::ChartError;
use crate::western::signs::{get_sign_index, sign_and_degree, Sign, SIGN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AscendantPosition {
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
}

impl AscendantPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        let (sign, degree_in_sign) = sign_and_degree(longitude);
        Self {
            longitude,
            sign,
            degree_in_sign,
        }
    }
}

/// The four chart angles, longitudes in [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Equal,
    /// Equal-house cusps standing in for Placidus
    #[serde(alias = "placidus")]
    PlacidusSimplified,
}

impl FromStr for HouseSystem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "whole_sign" | "wholesign" | "whole" => Ok(HouseSystem::WholeSign),
            "equal" => Ok(HouseSystem::Equal),
            "placidus" | "placidus_simplified" => Ok(HouseSystem::PlacidusSimplified),
            _ => Err(ParseError::UnknownHouseSystem(s.to_string())),
        }
    }
}

/// What anchors house 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FirstHouseReference {
    #[default]
    Ascendant,
    SunSign,
    MoonSign,
    ManualSign(Sign),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseCusp {
    pub house_number: u8,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Houses {
    pub system: HouseSystem,
    pub first_house_longitude: f64,
    pub cusps: Vec<HouseCusp>,
}

impl Houses {
    /// House (1-12) containing `longitude`, by sign
    pub fn house_of(&self, longitude: f64) -> u8 {
        house_number(longitude, self.first_house_longitude)
    }

    pub fn cusp(&self, house_number: u8) -> Option<&HouseCusp> {
        self.cusps.iter().find(|c| c.house_number == house_number)
    }
}

/// Reject out-of-range and polar locations
pub fn validate_location(location: &GeoLocation) -> Result<(), ChartError> {
    if !location.is_valid() {
        return Err(ChartError::InvalidLocation {
            lat: location.lat,
            lon: location.lon,
        });
    }
    if location.lat.abs() == 90.0 {
        return Err(ChartError::PolarLatitude { lat: location.lat });
    }
    Ok(())
}

/// Ascendant longitude from RAMC, obliquity and latitude (all degrees)
pub fn ascendant_from_ramc(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let ramc = ramc.to_radians();
    let eps = obliquity.to_radians();
    let phi = latitude.to_radians();
    let asc = f64::atan2(
        ramc.cos(),
        -(ramc.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_degrees(asc.to_degrees())
}

/// Midheaven longitude from RAMC and obliquity (degrees)
pub fn midheaven_from_ramc(ramc: f64, obliquity: f64) -> f64 {
    let ramc = ramc.to_radians();
    let eps = obliquity.to_radians();
    normalize_degrees(f64::atan2(ramc.sin(), ramc.cos() * eps.cos()).to_degrees())
}

/// Right ascension of the midheaven for an instant and location
fn ramc(instant: DateTime<Utc>, location: &GeoLocation) -> f64 {
    local_sidereal_degrees(gmst_hours(instant), location.lon)
}

pub fn ascendant(instant: DateTime<Utc>, location: &GeoLocation) -> Result<AscendantPosition, ChartError> {
    validate_location(location)?;
    let obliquity = mean_obliquity(centuries_since_j2000(instant));
    let longitude = ascendant_from_ramc(ramc(instant, location), obliquity, location.lat);
    Ok(AscendantPosition::from_longitude(longitude))
}

pub fn angles(instant: DateTime<Utc>, location: &GeoLocation) -> Result<ChartAngles, ChartError> {
    validate_location(location)?;
    let obliquity = mean_obliquity(centuries_since_j2000(instant));
    let ramc = ramc(instant, location);
    let asc = ascendant_from_ramc(ramc, obliquity, location.lat);
    let mc = midheaven_from_ramc(ramc, obliquity);
    Ok(ChartAngles {
        ascendant: asc,
        midheaven: mc,
        descendant: normalize_degrees(asc + 180.0),
        imum_coeli: normalize_degrees(mc + 180.0),
    })
}

/// Twelve cusps from a first-house reference longitude
pub fn house_cusps(system: HouseSystem, reference_longitude: f64) -> Vec<HouseCusp> {
    let reference = normalize_degrees(reference_longitude);
    let first = match system {
        HouseSystem::WholeSign => get_sign_index(reference) as f64 * SIGN_WIDTH,
        HouseSystem::Equal => reference,
        HouseSystem::PlacidusSimplified => {
            warn!("placidus requested; using equal-house cusps");
            reference
        }
    };
    (0..12u8)
        .map(|i| HouseCusp {
            house_number: i + 1,
            longitude: normalize_degrees(first + i as f64 * SIGN_WIDTH),
        })
        .collect()
}

/// `((floor(lon/30) − floor(first/30) + 12) mod 12) + 1`
pub fn house_number(body_longitude: f64, first_house_longitude: f64) -> u8 {
    let body_sign = get_sign_index(body_longitude) as i32;
    let first_sign = get_sign_index(first_house_longitude) as i32;
    ((body_sign - first_sign + 12).rem_euclid(12) + 1) as u8
}

/// Computes houses for a chart under a house system and first-house reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HouseCalculator {
    pub system: HouseSystem,
    pub reference: FirstHouseReference,
}

impl HouseCalculator {
    pub fn new(system: HouseSystem, reference: FirstHouseReference) -> Self {
        Self { system, reference }
    }

    /// Longitude that anchors house 1.
    ///
    /// The ascendant reference uses the exact ascendant; sign references use
    /// 0° of the sign. `location` is only needed for the ascendant.
    pub fn first_house_longitude(
        &self,
        chart: &Chart,
        location: Option<&GeoLocation>,
    ) -> Result<f64, ChartError> {
        match self.reference {
            FirstHouseReference::Ascendant => {
                let location = location.ok_or(ChartError::MissingLocation)?;
                Ok(ascendant(chart.instant, location)?.longitude)
            }
            FirstHouseReference::SunSign => {
                Ok(chart.require(Body::Sun)?.sign.start_longitude())
            }
            FirstHouseReference::MoonSign => {
                Ok(chart.require(Body::Moon)?.sign.start_longitude())
            }
            FirstHouseReference::ManualSign(sign) => Ok(sign.start_longitude()),
        }
    }

    pub fn calculate(&self, chart: &Chart, location: Option<&GeoLocation>) -> Result<Houses, ChartError> {
        let first = self.first_house_longitude(chart, location)?;
        Ok(Houses {
            system: self.system,
            first_house_longitude: first,
            cusps: house_cusps(self.system, first),
        })
    }
}
