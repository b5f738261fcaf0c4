pub mod adapter;
pub mod analytic;
pub mod nodes;
#[cfg(feature = "swisseph")]
pub mod swiss;
pub mod time;
pub mod types;

pub use adapter::{EphemerisBackend, EphemerisError, GeoPositionProvider};
pub use analytic::AnalyticEphemeris;
#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemerisBackend;
pub use types::{
    angular_separation, normalize_degrees, signed_difference, Body, BodyClass, GeoLocation,
    ParseError, PlanetPosition,
};
