use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, BodyClass, PlanetPosition};
use crate::error::ChartError;

/// All body positions for one instant, in canonical body order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub instant: DateTime<Utc>,
    positions: Vec<PlanetPosition>,
}

impl Chart {
    /// Build a chart from positions; later duplicates of a body are dropped
    /// and the result is sorted into canonical order.
    pub fn from_positions(instant: DateTime<Utc>, positions: Vec<PlanetPosition>) -> Self {
        let mut unique: Vec<PlanetPosition> = Vec::with_capacity(positions.len());
        for position in positions {
            if !unique.iter().any(|p| p.body == position.body) {
                unique.push(position);
            }
        }
        unique.sort_by_key(|p| p.body);
        Self {
            instant,
            positions: unique,
        }
    }

    pub fn positions(&self) -> &[PlanetPosition] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetPosition> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, body: Body) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    /// Position of `body`, or `MissingBody`
    pub fn require(&self, body: Body) -> Result<&PlanetPosition, ChartError> {
        self.get(body).ok_or(ChartError::MissingBody { body })
    }

    /// A chart containing only the bodies selected by `filter`
    pub fn filtered(&self, filter: BodyFilter) -> Chart {
        Chart {
            instant: self.instant,
            positions: self
                .positions
                .iter()
                .filter(|p| filter.includes(p.body))
                .copied()
                .collect(),
        }
    }
}

/// Display-side selection of chart bodies.
///
/// Filters apply to chart output only; positions are always computed for
/// every body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyFilter {
    #[default]
    All,
    Inner,
    Outer,
    Nodes,
    Single(Body),
}

impl BodyFilter {
    pub fn includes(self, body: Body) -> bool {
        match self {
            BodyFilter::All => true,
            BodyFilter::Inner => body.class() == BodyClass::Inner,
            BodyFilter::Outer => body.class() == BodyClass::Outer,
            BodyFilter::Nodes => body.class() == BodyClass::Node,
            BodyFilter::Single(only) => body == only,
        }
    }
}

impl std::str::FromStr for BodyFilter {
    type Err = crate::ephemeris::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(BodyFilter::All),
            "inner" => Ok(BodyFilter::Inner),
            "outer" => Ok(BodyFilter::Outer),
            "nodes" => Ok(BodyFilter::Nodes),
            other => other.parse::<Body>().map(BodyFilter::Single),
        }
    }
}
