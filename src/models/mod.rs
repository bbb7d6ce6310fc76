//! Data models
//!
//! Catalog entries and the values derived from them.

mod band;
mod food_item;
mod serving;

pub use band::{GlycemicBand, GlycemicMeasure};
pub use food_item::{FoodItem, GI_NOMINAL_MAX};
pub use serving::ServingResult;
