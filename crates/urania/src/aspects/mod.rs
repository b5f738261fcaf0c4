pub mod calculator;
pub mod midpoints;
pub mod policy;
pub mod types;

pub use calculator::{aspect_direction, AspectCalculator};
pub use midpoints::{chart_midpoints, midpoint_longitude, Midpoint};
pub use policy::{BodyMatch, OrbPolicy, OrbRule, OrbTier, Selector, STANDARD_RULES};
pub use types::{AspectContext, AspectPhase, AspectPoint, AspectResult, AspectType};
