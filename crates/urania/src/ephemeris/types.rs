use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::western::signs::{sign_and_degree, Sign};

/// Errors produced when parsing identifiers from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown body: {0}. Valid bodies: sun, moon, mercury, venus, mars, jupiter, saturn, uranus, neptune, pluto, north_node, south_node")]
    UnknownBody(String),
    #[error("Unknown sign: {0}")]
    UnknownSign(String),
    #[error("Unknown house system: {0}. Valid systems: whole_sign, equal, placidus")]
    UnknownHouseSystem(String),
    #[error("Unknown aspect: {0}")]
    UnknownAspect(String),
}

/// The twelve chart bodies, in canonical chart order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

/// Orb-policy class of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyClass {
    Inner,
    Outer,
    Node,
}

lazy_static::lazy_static! {
    static ref BODY_BY_NAME: HashMap<&'static str, Body> = {
        let mut map = HashMap::new();
        for body in Body::ALL {
            map.insert(body.id(), body);
        }
        map.insert("mean_node", Body::NorthNode);
        map.insert("true_node", Body::NorthNode);
        map.insert("rahu", Body::NorthNode);
        map.insert("ketu", Body::SouthNode);
        map
    };
}

impl Body {
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// Lowercase identifier, as used in configuration and JSON
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
        }
    }

    pub fn class(self) -> BodyClass {
        match self {
            Body::Sun | Body::Moon | Body::Mercury | Body::Venus | Body::Mars => BodyClass::Inner,
            Body::Jupiter | Body::Saturn | Body::Uranus | Body::Neptune | Body::Pluto => {
                BodyClass::Outer
            }
            Body::NorthNode | Body::SouthNode => BodyClass::Node,
        }
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }

    pub fn is_node(self) -> bool {
        self.class() == BodyClass::Node
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Body {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        BODY_BY_NAME
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseError::UnknownBody(s.to_string()))
    }
}

/// Geographic location coordinates (degrees, east-positive longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validating constructor; out-of-range coordinates are rejected, never clamped
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, crate::error::ChartError> {
        let location = Self::new(lat, lon);
        if location.is_valid() {
            Ok(location)
        } else {
            Err(crate::error::ChartError::InvalidLocation { lat, lon })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Position of one body in a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub body: Body,
    /// Longitude in degrees [0, 360)
    pub longitude: f64,
    pub sign: Sign,
    /// Degrees into `sign`, [0, 30)
    pub degree_in_sign: f64,
    pub is_retrograde: bool,
}

impl PlanetPosition {
    pub fn new(body: Body, longitude: f64, is_retrograde: bool) -> Self {
        let longitude = normalize_degrees(longitude);
        let (sign, degree_in_sign) = sign_and_degree(longitude);
        Self {
            body,
            longitude,
            sign,
            degree_in_sign,
            is_retrograde,
        }
    }
}

/// Map any angle into [0, 360). 360 (and a rounding result of 360) becomes 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Signed difference `to - from` mapped into (-180, 180]
pub fn signed_difference(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Shortest angular distance between two longitudes, [0, 180]
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (a - b).abs() % 360.0;
    raw.min(360.0 - raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(370.5), 10.5);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_signed_difference() {
        assert_eq!(signed_difference(350.0, 10.0), 20.0);
        assert_eq!(signed_difference(10.0, 350.0), -20.0);
        assert_eq!(signed_difference(0.0, 180.0), 180.0);
        assert_eq!(signed_difference(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_angular_separation() {
        assert_eq!(angular_separation(10.0, 12.0), 2.0);
        assert_eq!(angular_separation(355.0, 5.0), 10.0);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_body_parsing() {
        assert_eq!("Sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("north node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("mean_node".parse::<Body>().unwrap(), Body::NorthNode);
        assert!(matches!("chiron".parse::<Body>(), Err(ParseError::UnknownBody(_))));
    }

    #[test]
    fn test_body_classes() {
        assert_eq!(Body::Mars.class(), BodyClass::Inner);
        assert_eq!(Body::Jupiter.class(), BodyClass::Outer);
        assert_eq!(Body::SouthNode.class(), BodyClass::Node);
    }
}
