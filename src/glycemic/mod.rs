//! Glycemic calculation module
//!
//! Serving-size scaling, classification, filtering, sorting and the derived
//! table and chart geometry.

pub mod calculator;
pub mod classify;
pub mod error;
pub mod region;
pub mod table;

pub use calculator::{
    calculate, compute_serving, filter_by_category, sort_by_glycemic_load, validate_serving_size,
    Calculation, EmptyReason, Selection, DEFAULT_SERVING_SIZE_G, SERVING_SIZE_MAX_G,
    SERVING_SIZE_MIN_G, SERVING_SIZE_STEP_G,
};
pub use classify::{classify, Thresholds, GI_THRESHOLDS, GL_THRESHOLDS};
pub use error::{GlError, GlResult};
pub use region::{ChartLayout, HighLoadRegion, HIGH_LOAD_GL};
pub use table::{table_rows, FoodTable, FoodTableRow};
