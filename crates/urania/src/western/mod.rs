pub mod houses;
pub mod signs;

pub use houses::{
    angles, ascendant, house_cusps, house_number, AscendantPosition, ChartAngles,
    FirstHouseReference, HouseCalculator, HouseCusp, HouseSystem, Houses,
};
pub use signs::{get_sign_index, sign_and_degree, Sign};
