//! Zodiac signs and the longitude → (sign, degree) conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::types::{normalize_degrees, ParseError};

/// Width of one sign in degrees
pub const SIGN_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Zero-based index, Aries = 0
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Sign for an index, wrapping past Pisces
    pub fn from_index(index: u8) -> Sign {
        Sign::ALL[(index % 12) as usize]
    }

    /// Sign containing a longitude
    pub fn from_longitude(longitude: f64) -> Sign {
        Sign::from_index(get_sign_index(longitude))
    }

    /// Longitude of 0° of this sign
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }

    /// The sign `steps` places further along the zodiac
    pub fn offset(self, steps: i32) -> Sign {
        Sign::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index() as usize]
    }
}

const SIGN_NAMES: &[&str] = &[
    "aries", "taurus", "gemini", "cancer",
    "leo", "virgo", "libra", "scorpio",
    "sagittarius", "capricorn", "aquarius", "pisces",
];

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sign {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SIGN_NAMES
            .iter()
            .position(|name| *name == lower)
            .map(|idx| Sign::from_index(idx as u8))
            .ok_or_else(|| ParseError::UnknownSign(s.to_string()))
    }
}

/// Get sign index (0-11) from longitude
pub fn get_sign_index(longitude: f64) -> u8 {
    let normalized = normalize_degrees(longitude);
    // floor(359.999.../30) can round up to 12.0
    ((normalized / SIGN_WIDTH).floor() as u8).min(11)
}

/// Convert a longitude into its sign and the degree within that sign.
///
/// `degree_in_sign` is `longitude mod 30` and always lies in `[0, 30)`.
pub fn sign_and_degree(longitude: f64) -> (Sign, f64) {
    let normalized = normalize_degrees(longitude);
    let index = get_sign_index(normalized);
    let degree = normalized - index as f64 * SIGN_WIDTH;
    let degree = if degree >= SIGN_WIDTH { 0.0 } else { degree.max(0.0) };
    (Sign::from_index(index), degree)
}
