use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::{AspectPhase, AspectResult};
use crate::ephemeris::Body;
use crate::western::Sign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunationKind {
    NewMoon,
    FullMoon,
}

impl fmt::Display for LunationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LunationKind::NewMoon => "new moon",
            LunationKind::FullMoon => "full moon",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    Solar,
    Lunar,
}

impl EclipseKind {
    pub fn lunation(self) -> LunationKind {
        match self {
            EclipseKind::Solar => LunationKind::NewMoon,
            EclipseKind::Lunar => LunationKind::FullMoon,
        }
    }
}

impl fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EclipseKind::Solar => "solar",
            EclipseKind::Lunar => "lunar",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    Retrograde,
    Direct,
}

/// A new or full moon found on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lunation {
    pub kind: LunationKind,
    pub date: NaiveDate,
    /// Sample instant with the tightest orb
    pub instant: DateTime<Utc>,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    /// Sign of the Moon
    pub sign: Sign,
    pub orb: f64,
    pub phase: AspectPhase,
    pub eclipse: Option<EclipseKind>,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingress {
    pub body: Body,
    pub date: NaiveDate,
    pub sign: Sign,
    pub previous_sign: Sign,
    pub longitude: f64,
    /// Degrees already covered inside the new sign
    pub degrees_traveled: f64,
    pub is_retrograde: bool,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub body: Body,
    pub date: NaiveDate,
    pub phase: StationKind,
    pub longitude: f64,
    pub sign: Sign,
    pub house: Option<u8>,
}

/// An aspect from a qualified eclipse point to a planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseAspect {
    pub date: NaiveDate,
    pub eclipse: EclipseKind,
    pub eclipse_longitude: f64,
    pub aspect: AspectResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemporalEvent {
    Lunation(Lunation),
    SignIngress(Ingress),
    EclipseAspect(EclipseAspect),
    Station(Station),
}

impl TemporalEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            TemporalEvent::Lunation(e) => e.date,
            TemporalEvent::SignIngress(e) => e.date,
            TemporalEvent::EclipseAspect(e) => e.date,
            TemporalEvent::Station(e) => e.date,
        }
    }

    pub fn as_lunation(&self) -> Option<&Lunation> {
        match self {
            TemporalEvent::Lunation(lunation) => Some(lunation),
            _ => None,
        }
    }
}

impl fmt::Display for TemporalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalEvent::Lunation(l) => {
                write!(f, "{}: {} in {} (orb {:.2}°, {})", l.date, l.kind, l.sign, l.orb, l.phase)?;
                if let Some(eclipse) = l.eclipse {
                    write!(f, ", {eclipse} eclipse")?;
                }
                Ok(())
            }
            TemporalEvent::SignIngress(i) => write!(
                f,
                "{}: {} enters {} ({:.2}° in{})",
                i.date,
                i.body,
                i.sign,
                i.degrees_traveled,
                if i.is_retrograde { ", retrograde" } else { "" }
            ),
            TemporalEvent::EclipseAspect(e) => write!(f, "{}: {}", e.date, e.aspect),
            TemporalEvent::Station(s) => {
                let phase = match s.phase {
                    StationKind::Retrograde => "retrograde",
                    StationKind::Direct => "direct",
                };
                write!(f, "{}: {} stations {} in {}", s.date, s.body, phase, s.sign)
            }
        }
    }
}
