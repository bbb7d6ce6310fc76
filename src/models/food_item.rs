//! Food Item model
//!
//! A catalog entry: a food with its glycemic index and carbohydrate density.

use serde::Serialize;

use super::GlycemicBand;
use crate::glycemic::{classify, GI_THRESHOLDS};

/// Upper end of the nominal GI scale (pure glucose)
pub const GI_NOMINAL_MAX: f64 = 100.0;

/// A food in the catalog
///
/// Values are properties of the food itself, not of any serving:
/// `carbs_per_100g` is normalized to 100 grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodItem {
    pub name: &'static str,
    pub glycemic_index: f64,
    pub carbs_per_100g: f64,
    pub category: &'static str,
}

impl FoodItem {
    pub const fn new(
        name: &'static str,
        glycemic_index: f64,
        carbs_per_100g: f64,
        category: &'static str,
    ) -> Self {
        Self {
            name,
            glycemic_index,
            carbs_per_100g,
            category,
        }
    }

    /// GI band of the food (independent of serving size)
    pub fn gi_band(&self) -> GlycemicBand {
        classify(self.glycemic_index, &GI_THRESHOLDS)
    }

    /// True when the GI lies above the nominal 0-100 scale.
    ///
    /// Such values are kept as published but are likely data errors.
    pub fn exceeds_nominal_scale(&self) -> bool {
        self.glycemic_index > GI_NOMINAL_MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gi_band() {
        assert_eq!(FoodItem::new("Apple", 36.0, 14.0, "Fruits").gi_band(), GlycemicBand::Low);
        assert_eq!(FoodItem::new("Honey", 61.0, 80.0, "Sweets").gi_band(), GlycemicBand::Medium);
        assert_eq!(FoodItem::new("White bread", 75.0, 49.0, "Baked goods").gi_band(), GlycemicBand::High);
    }

    #[test]
    fn test_exceeds_nominal_scale() {
        assert!(FoodItem::new("Baked Potato", 111.0, 17.0, "Vegetables").exceeds_nominal_scale());
        assert!(!FoodItem::new("Glucose", 100.0, 100.0, "Sweets").exceeds_nominal_scale());
    }
}
