use serde::{Deserialize, Serialize};

/// Thresholds and sampling used by the event detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    /// UTC hours sampled on each day when looking for lunations
    pub sample_hours: Vec<u32>,
    /// Widest Sun–Moon orb reported as a lunation
    pub lunation_orb: f64,
    /// Lunations at or below this orb are exact
    pub exact_orb: f64,
    /// A new moon is a solar eclipse when a node lies within this of the Sun
    pub solar_node_limit: f64,
    /// A full moon is a lunar eclipse when a node lies within this of the Moon
    pub lunar_node_limit: f64,
    /// UTC hour compared across consecutive days for ingresses and stations
    pub reference_hour: u32,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            sample_hours: vec![0, 6, 12, 18],
            lunation_orb: 5.0,
            exact_orb: 1.5,
            solar_node_limit: 18.0,
            lunar_node_limit: 12.0,
            reference_hour: 12,
        }
    }
}
