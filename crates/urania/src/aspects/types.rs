use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ephemeris::{Body, ParseError};
use crate::events::EclipseKind;

/// The five major aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Order in which aspects are tried; the first match wins
    pub const SCAN_ORDER: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
    ];

    /// Exact angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }

    /// Conjunctions and oppositions happen once per synodic cycle, the rest twice
    pub fn occurrences_per_cycle(self) -> u32 {
        match self {
            AspectType::Conjunction | AspectType::Opposition => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conjunction" | "conj" => Ok(AspectType::Conjunction),
            "sextile" | "sext" => Ok(AspectType::Sextile),
            "square" | "sq" => Ok(AspectType::Square),
            "trine" => Ok(AspectType::Trine),
            "opposition" | "opp" => Ok(AspectType::Opposition),
            _ => Err(ParseError::UnknownAspect(s.to_string())),
        }
    }
}

/// Which pair of charts (or synthetic points) an aspect relates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectContext {
    NatalToTransit,
    TransitToTransit,
    NatalToMidpoint,
    EclipseToPlanet,
}

/// One side of an aspect: a body or a synthetic point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPoint {
    Body(Body),
    Midpoint(Body, Body),
    Eclipse(EclipseKind),
}

impl AspectPoint {
    pub fn body(self) -> Option<Body> {
        match self {
            AspectPoint::Body(body) => Some(body),
            _ => None,
        }
    }
}

impl From<Body> for AspectPoint {
    fn from(body: Body) -> Self {
        AspectPoint::Body(body)
    }
}

impl fmt::Display for AspectPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectPoint::Body(body) => write!(f, "{body}"),
            AspectPoint::Midpoint(a, b) => write!(f, "{a}/{b}"),
            AspectPoint::Eclipse(kind) => write!(f, "{kind} eclipse"),
        }
    }
}

/// Whether an aspect is tightening, exact, or widening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectPhase {
    Applying,
    Exact,
    Separating,
}

impl fmt::Display for AspectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AspectPhase::Applying => "applying",
            AspectPhase::Exact => "exact",
            AspectPhase::Separating => "separating",
        })
    }
}

/// A detected aspect; only constructed when `orb <= orb_limit`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectResult {
    pub point_a: AspectPoint,
    pub point_b: AspectPoint,
    pub aspect_type: AspectType,
    pub exact_angle: f64,
    pub orb: f64,
    pub orb_limit: f64,
    pub context: AspectContext,
    pub direction: AspectPhase,
}

impl fmt::Display for AspectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (orb {:.2}°, {})",
            self.point_a, self.aspect_type, self.point_b, self.orb, self.direction
        )
    }
}
