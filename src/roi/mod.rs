pub mod engine;
pub mod wallbox;

pub use engine::{
    calculate_roi, CalculatorInput, CalculatorResult, Payback, RoiModel, YearRow,
    DEFAULT_CONSUMPTION_KWH_PER_KM, DEFAULT_PUBLIC_PRICE_PER_KWH, DEFAULT_YEARS_TO_PROJECT,
};
pub use wallbox::WallboxPreset;
