//! Serving result
//!
//! Carbohydrate content and glycemic load of one food for one serving size.

use serde::{Deserialize, Serialize};

use super::GlycemicBand;

/// Derived values for a (food, serving size) pair.
///
/// Has no identity of its own and is recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingResult {
    pub name: String,
    pub category: String,
    pub glycemic_index: f64,
    pub carbs_for_serving: f64,
    pub glycemic_load: f64,
    pub gi_band: GlycemicBand,
    pub gl_band: GlycemicBand,
}
