//! GI / GL classification
//!
//! Maps a glycemic index or glycemic load value onto a low/medium/high band.

use serde::Serialize;

use crate::models::{GlycemicBand, GlycemicMeasure};

/// Band boundaries for one measure.
///
/// `value <= low_max` is low, `value >= high_min` is high, anything in
/// between (including fractional values such as 55.5) is medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub low_max: f64,
    pub high_min: f64,
}

/// GI: low <= 55, medium 56-69, high >= 70
pub const GI_THRESHOLDS: Thresholds = Thresholds {
    low_max: 55.0,
    high_min: 70.0,
};

/// GL: low <= 10, medium 11-19, high >= 20
pub const GL_THRESHOLDS: Thresholds = Thresholds {
    low_max: 10.0,
    high_min: 20.0,
};

impl Thresholds {
    pub fn for_measure(measure: GlycemicMeasure) -> &'static Thresholds {
        match measure {
            GlycemicMeasure::Gi => &GI_THRESHOLDS,
            GlycemicMeasure::Gl => &GL_THRESHOLDS,
        }
    }
}

/// Classify a value against a set of thresholds
pub fn classify(value: f64, thresholds: &Thresholds) -> GlycemicBand {
    if value <= thresholds.low_max {
        GlycemicBand::Low
    } else if value >= thresholds.high_min {
        GlycemicBand::High
    } else {
        GlycemicBand::Medium
    }
}
