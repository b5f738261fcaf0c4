pub mod builder;
pub mod types;

pub use builder::ChartBuilder;
pub use types::{BodyFilter, Chart};
