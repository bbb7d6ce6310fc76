//! Glycemic load calculator
//!
//! Scales catalog foods to a serving size and derives carbohydrate content,
//! glycemic load and classification bands. Everything here is a pure function
//! of its inputs: the catalog is never modified and nothing is cached.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::classify::{classify, GI_THRESHOLDS, GL_THRESHOLDS};
use super::error::{GlError, GlResult};
use crate::catalog::{all_categories, categories};
use crate::models::{FoodItem, ServingResult};

/// Serving-size control bounds (grams)
pub const SERVING_SIZE_MIN_G: f64 = 50.0;
pub const SERVING_SIZE_MAX_G: f64 = 500.0;
pub const SERVING_SIZE_STEP_G: f64 = 10.0;
pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;

/// Why a selection produced no foods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The caller selected no categories at all
    NoCategoriesSelected,
    /// Categories were selected but none of them has any food
    NoMatchingItems,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyReason::NoCategoriesSelected => {
                "No foods selected. Please choose at least one food category."
            }
            EmptyReason::NoMatchingItems => "No foods match the selected categories.",
        }
    }
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of filtering the catalog by category
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    Items(Vec<&'a FoodItem>),
    Empty(EmptyReason),
}

/// Outcome of a full calculation request
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    /// Results in catalog order
    Ready {
        serving_size_g: f64,
        results: Vec<ServingResult>,
        ignored_categories: Vec<String>,
    },
    Empty {
        reason: EmptyReason,
        ignored_categories: Vec<String>,
    },
}

impl Calculation {
    pub fn results(&self) -> &[ServingResult] {
        match self {
            Calculation::Ready { results, .. } => results,
            Calculation::Empty { .. } => &[],
        }
    }

    pub fn ignored_categories(&self) -> &[String] {
        match self {
            Calculation::Ready { ignored_categories, .. }
            | Calculation::Empty { ignored_categories, .. } => ignored_categories,
        }
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Calculation::Ready { .. } => None,
            Calculation::Empty { reason, .. } => Some(*reason),
        }
    }
}

/// Reject serving sizes that are not finite or not strictly positive
pub fn validate_serving_size(serving_size_g: f64) -> GlResult<f64> {
    if serving_size_g.is_finite() && serving_size_g > 0.0 {
        Ok(serving_size_g)
    } else {
        Err(GlError::InvalidServingSize(serving_size_g))
    }
}

/// Compute carbs, glycemic load and bands of `item` for a serving.
///
/// Assumes a serving size already accepted by [`validate_serving_size`].
pub fn compute_serving(item: &FoodItem, serving_size_g: f64) -> ServingResult {
    let carbs_for_serving = item.carbs_per_100g * serving_size_g / 100.0;
    let glycemic_load = item.glycemic_index * item.carbs_per_100g * serving_size_g / 10_000.0;

    ServingResult {
        name: item.name.to_string(),
        category: item.category.to_string(),
        glycemic_index: item.glycemic_index,
        carbs_for_serving,
        glycemic_load,
        gi_band: classify(item.glycemic_index, &GI_THRESHOLDS),
        gl_band: classify(glycemic_load, &GL_THRESHOLDS),
    }
}

/// Keep the items whose category is selected, in catalog order
pub fn filter_by_category<'a>(catalog: &'a [FoodItem], selected: &BTreeSet<String>) -> Selection<'a> {
    if selected.is_empty() {
        return Selection::Empty(EmptyReason::NoCategoriesSelected);
    }

    let items: Vec<&FoodItem> = catalog
        .iter()
        .filter(|item| selected.contains(item.category))
        .collect();

    if items.is_empty() {
        Selection::Empty(EmptyReason::NoMatchingItems)
    } else {
        Selection::Items(items)
    }
}

/// Ascending by glycemic load; ties keep their input order
pub fn sort_by_glycemic_load(mut results: Vec<ServingResult>) -> Vec<ServingResult> {
    results.sort_by(|a, b| a.glycemic_load.total_cmp(&b.glycemic_load));
    results
}

/// Run a full request: validate, filter and compute.
///
/// `None` selects every category. Selected names that are not categories of
/// the catalog are ignored and handed back in `ignored_categories`.
pub fn calculate(
    catalog: &[FoodItem],
    serving_size_g: f64,
    selected: Option<&BTreeSet<String>>,
) -> GlResult<Calculation> {
    let serving_size_g = validate_serving_size(serving_size_g)?;

    let selected = match selected {
        Some(set) => set.clone(),
        None => all_categories(catalog),
    };

    let known = categories(catalog);
    let ignored_categories: Vec<String> = selected
        .iter()
        .filter(|c| !known.iter().any(|k| *k == c.as_str()))
        .cloned()
        .collect();
    if !ignored_categories.is_empty() {
        warn!(?ignored_categories, "Ignoring unknown categories");
    }

    match filter_by_category(catalog, &selected) {
        Selection::Empty(reason) => {
            debug!(?reason, serving_size_g, "Empty selection");
            Ok(Calculation::Empty {
                reason,
                ignored_categories,
            })
        }
        Selection::Items(items) => {
            let results: Vec<ServingResult> = items
                .into_iter()
                .map(|item| compute_serving(item, serving_size_g))
                .collect();
            debug!(count = results.len(), serving_size_g, "Computed glycemic load");
            Ok(Calculation::Ready {
                serving_size_g,
                results,
                ignored_categories,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find, CATALOG};
    use crate::models::GlycemicBand;

    const EPS: f64 = 1e-9;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn names(results: &[ServingResult]) -> Vec<&str> {
        results.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_white_bread_100g() {
        let bread = find(CATALOG, "White bread").unwrap();
        let r = compute_serving(bread, 100.0);
        assert_eq!(r.carbs_for_serving, 49.0);
        assert!((r.glycemic_load - 36.75).abs() < EPS);
        assert_eq!(r.gi_band, GlycemicBand::High);
        assert_eq!(r.gl_band, GlycemicBand::High);
    }

    #[test]
    fn test_apple_200g() {
        let apple = find(CATALOG, "Apple").unwrap();
        let r = compute_serving(apple, 200.0);
        assert_eq!(r.carbs_for_serving, 28.0);
        assert!((r.glycemic_load - 10.08).abs() < EPS);
        assert_eq!(r.gi_band, GlycemicBand::Low);
        assert_eq!(r.gl_band, GlycemicBand::Medium);
    }

    #[test]
    fn test_both_gl_formulas_agree() {
        for serving in [1.0, 37.5, 50.0, 100.0, 250.0, 500.0, 1234.5] {
            for item in CATALOG {
                let r = compute_serving(item, serving);
                let via_carbs = item.glycemic_index * r.carbs_for_serving / 100.0;
                assert!(
                    (r.glycemic_load - via_carbs).abs() < 1e-9 * r.glycemic_load.max(1.0),
                    "{} at {}g",
                    item.name,
                    serving
                );
                assert!((r.carbs_for_serving - item.carbs_per_100g * serving / 100.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_100g_serving_is_identity_for_carbs() {
        for item in CATALOG {
            assert_eq!(compute_serving(item, 100.0).carbs_for_serving, item.carbs_per_100g);
        }
    }

    #[test]
    fn test_gl_strictly_increasing_in_serving_size() {
        for item in CATALOG.iter().filter(|i| i.glycemic_index > 0.0 && i.carbs_per_100g > 0.0) {
            let mut previous = f64::NEG_INFINITY;
            let mut serving = SERVING_SIZE_MIN_G;
            while serving <= SERVING_SIZE_MAX_G {
                let gl = compute_serving(item, serving).glycemic_load;
                assert!(gl > previous, "{} not increasing at {}g", item.name, serving);
                previous = gl;
                serving += SERVING_SIZE_STEP_G;
            }
        }
    }

    #[test]
    fn test_gl_scales_linearly() {
        let honey = find(CATALOG, "Honey").unwrap();
        let single = compute_serving(honey, 100.0).glycemic_load;
        let triple = compute_serving(honey, 300.0).glycemic_load;
        assert!((triple - 3.0 * single).abs() < EPS);
    }

    #[test]
    fn test_validate_serving_size() {
        assert_eq!(validate_serving_size(100.0), Ok(100.0));
        assert_eq!(validate_serving_size(0.5), Ok(0.5));
        assert_eq!(validate_serving_size(1000.0), Ok(1000.0));
        assert_eq!(validate_serving_size(0.0), Err(GlError::InvalidServingSize(0.0)));
        assert_eq!(validate_serving_size(-10.0), Err(GlError::InvalidServingSize(-10.0)));
        assert!(validate_serving_size(f64::NAN).is_err());
        assert!(validate_serving_size(f64::INFINITY).is_err());
    }

    #[test]
    fn test_filter_full_set_returns_catalog_in_order() {
        match filter_by_category(CATALOG, &all_categories(CATALOG)) {
            Selection::Items(items) => {
                assert_eq!(items.len(), CATALOG.len());
                for (got, want) in items.iter().zip(CATALOG) {
                    assert_eq!(*got, want);
                }
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_empty_set_signals_no_categories() {
        assert_eq!(
            filter_by_category(CATALOG, &BTreeSet::new()),
            Selection::Empty(EmptyReason::NoCategoriesSelected)
        );
    }

    #[test]
    fn test_filter_unmatched_set_signals_no_matching_items() {
        assert_eq!(
            filter_by_category(CATALOG, &set(&["Meat"])),
            Selection::Empty(EmptyReason::NoMatchingItems)
        );
    }

    #[test]
    fn test_filter_legumes() {
        match filter_by_category(CATALOG, &set(&["Legumes"])) {
            Selection::Items(items) => {
                let got: Vec<&str> = items.iter().map(|i| i.name).collect();
                assert_eq!(got, vec!["Kidney beans", "Lentils", "Chickpeas"]);
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        assert_eq!(
            filter_by_category(CATALOG, &set(&["legumes"])),
            Selection::Empty(EmptyReason::NoMatchingItems)
        );
    }

    #[test]
    fn test_sort_is_ascending_and_stable() {
        let tie = |name: &str, gl: f64| ServingResult {
            name: name.to_string(),
            category: "Test".to_string(),
            glycemic_index: 50.0,
            carbs_for_serving: 10.0,
            glycemic_load: gl,
            gi_band: GlycemicBand::Low,
            gl_band: GlycemicBand::Low,
        };
        let sorted = sort_by_glycemic_load(vec![
            tie("c", 5.0),
            tie("a", 1.0),
            tie("first-tie", 3.0),
            tie("b", 2.0),
            tie("second-tie", 3.0),
        ]);
        assert_eq!(names(&sorted), vec!["a", "b", "first-tie", "second-tie", "c"]);
    }

    #[test]
    fn test_sort_whole_catalog() {
        let results: Vec<_> = CATALOG.iter().map(|i| compute_serving(i, 150.0)).collect();
        let sorted = sort_by_glycemic_load(results);
        assert_eq!(sorted.len(), CATALOG.len());
        assert!(sorted.windows(2).all(|w| w[0].glycemic_load <= w[1].glycemic_load));
        assert_eq!(sorted[0].name, "Plain yogurt");
        assert_eq!(sorted.last().unwrap().name, "White sugar");
    }

    #[test]
    fn test_calculate_defaults_to_all_categories() {
        let calc = calculate(CATALOG, DEFAULT_SERVING_SIZE_G, None).unwrap();
        assert_eq!(calc.results().len(), CATALOG.len());
        assert_eq!(calc.empty_reason(), None);
        assert!(calc.ignored_categories().is_empty());
        assert_eq!(calc.results()[0].name, "White bread");
    }

    #[test]
    fn test_calculate_empty_selection_is_not_an_error() {
        let calc = calculate(CATALOG, 100.0, Some(&BTreeSet::new())).unwrap();
        assert_eq!(calc.empty_reason(), Some(EmptyReason::NoCategoriesSelected));
        assert!(calc.results().is_empty());
    }

    #[test]
    fn test_calculate_ignores_and_reports_unknown_categories() {
        let calc = calculate(CATALOG, 100.0, Some(&set(&["Fruits", "Meat"]))).unwrap();
        assert_eq!(names(calc.results()), vec!["Apple", "Banana", "Orange"]);
        assert_eq!(calc.ignored_categories(), &["Meat".to_string()]);

        let calc = calculate(CATALOG, 100.0, Some(&set(&["Meat", "Fish"]))).unwrap();
        assert_eq!(calc.empty_reason(), Some(EmptyReason::NoMatchingItems));
        assert_eq!(calc.ignored_categories().len(), 2);
    }

    #[test]
    fn test_calculate_rejects_invalid_serving_size() {
        assert_eq!(
            calculate(CATALOG, 0.0, None),
            Err(GlError::InvalidServingSize(0.0))
        );
        assert!(calculate(CATALOG, -50.0, Some(&BTreeSet::new())).is_err());
    }

    #[test]
    fn test_calculate_does_not_touch_catalog() {
        let before: Vec<FoodItem> = CATALOG.to_vec();
        let _ = calculate(CATALOG, 420.0, None).unwrap();
        assert_eq!(before, CATALOG.to_vec());
    }
}
