//! Food catalog
//!
//! The fixed list of foods the calculator works on. Built at compile time and
//! never mutated.

use std::collections::BTreeSet;

use crate::models::FoodItem;

/// Every food known to the calculator, grouped by category
pub const CATALOG: &[FoodItem] = &[
    FoodItem::new("White bread", 75.0, 49.0, "Baked goods"),
    FoodItem::new("Whole grain bread", 58.0, 43.0, "Baked goods"),
    FoodItem::new("Sourdough bread", 54.0, 49.0, "Baked goods"),
    FoodItem::new("Rice (white)", 73.0, 28.0, "Grains and pasta"),
    FoodItem::new("Pasta", 53.0, 25.0, "Grains and pasta"),
    FoodItem::new("Boiled rolled oats", 60.0, 60.0, "Grains and pasta"),
    FoodItem::new("Boiled Potato", 82.0, 17.0, "Vegetables"),
    // Published value, above the nominal scale. Kept as-is; see data_warnings()
    FoodItem::new("Baked Potato", 111.0, 17.0, "Vegetables"),
    FoodItem::new("Sweet potato", 63.0, 20.0, "Vegetables"),
    FoodItem::new("Apple", 36.0, 14.0, "Fruits"),
    FoodItem::new("Banana", 51.0, 23.0, "Fruits"),
    FoodItem::new("Orange", 43.0, 12.0, "Fruits"),
    FoodItem::new("Kidney beans", 35.0, 60.0, "Legumes"),
    FoodItem::new("Lentils", 32.0, 20.0, "Legumes"),
    FoodItem::new("Chickpeas", 28.0, 27.0, "Legumes"),
    FoodItem::new("Milk chocolate", 49.0, 59.0, "Sweets"),
    FoodItem::new("90% dark chocolate", 23.0, 14.0, "Sweets"),
    FoodItem::new("Ice cream", 57.0, 24.0, "Sweets"),
    FoodItem::new("Honey", 61.0, 80.0, "Sweets"),
    FoodItem::new("White sugar", 64.0, 100.0, "Sweets"),
    FoodItem::new("Plain yogurt", 27.0, 6.0, "Dairies"),
];

/// Distinct categories of a catalog, sorted alphabetically
pub fn categories(catalog: &[FoodItem]) -> Vec<&'static str> {
    catalog
        .iter()
        .map(|item| item.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The full category set of a catalog, as used for the default selection
pub fn all_categories(catalog: &[FoodItem]) -> BTreeSet<String> {
    catalog.iter().map(|item| item.category.to_string()).collect()
}

/// Look up a food by exact name
pub fn find<'a>(catalog: &'a [FoodItem], name: &str) -> Option<&'a FoodItem> {
    catalog.iter().find(|item| item.name == name)
}

/// Human-readable warnings for suspicious catalog entries
pub fn data_warnings(catalog: &[FoodItem]) -> Vec<String> {
    catalog
        .iter()
        .filter(|item| item.exceeds_nominal_scale())
        .map(|item| {
            format!(
                "{} has GI {} which exceeds the nominal 0-100 scale (possible data error)",
                item.name, item.glycemic_index
            )
        })
        .collect()
}
