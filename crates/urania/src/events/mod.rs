//! Time-localized events: lunations, eclipses, sign ingresses and stations.

pub mod calendar;
pub mod detector;
pub mod ingress;
pub mod lunation;
pub mod settings;
pub mod types;

pub use calendar::TransitCalendar;
pub use detector::EventDetector;
pub use ingress::{degrees_traveled, ingresses_between, stations_between};
pub use lunation::{eclipse_kind, eclipse_longitude, find_lunations, lunation_phase, LuminarySample};
pub use settings::EventSettings;
pub use types::{
    EclipseAspect, EclipseKind, Ingress, Lunation, LunationKind, Station, StationKind, TemporalEvent,
};
