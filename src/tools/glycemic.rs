//! Glycemic MCP Tools
//!
//! Catalog listing, glycemic load calculation, classification, and the chart
//! and report outputs built on top of them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{categories, find, CATALOG};
use crate::glycemic::{
    calculate, classify, compute_serving, table_rows, validate_serving_size, Calculation,
    EmptyReason, FoodTableRow, GlError, GlResult, Thresholds,
};
use crate::models::{FoodItem, GlycemicBand, GlycemicMeasure, ServingResult};
use crate::tools::charts::write_glycemic_chart;
use crate::tools::reports::{generate_glycemic_report, GenerateReportResponse, ReportError};

/// Category with its number of foods
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub foods: usize,
}

/// Response for list_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub total: usize,
}

/// Summary of a catalog food
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub name: String,
    pub category: String,
    pub glycemic_index: f64,
    pub carbs_per_100g: f64,
    pub gi_band: GlycemicBand,
    /// GI above the nominal 0-100 scale (likely a data error)
    pub exceeds_nominal_scale: bool,
}

impl From<&FoodItem> for FoodSummary {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.to_string(),
            category: item.category.to_string(),
            glycemic_index: item.glycemic_index,
            carbs_per_100g: item.carbs_per_100g,
            gi_band: item.gi_band(),
            exceeds_nominal_scale: item.exceeds_nominal_scale(),
        }
    }
}

/// Response for list_foods
#[derive(Debug, Serialize)]
pub struct ListFoodsResponse {
    pub items: Vec<FoodSummary>,
    pub total: usize,
}

/// Response for get_food
#[derive(Debug, Serialize)]
pub struct FoodDetailResponse {
    pub food: FoodSummary,
    pub serving: ServingResult,
}

/// Response for calculate_glycemic_load
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub serving_size_g: f64,
    pub empty: bool,
    pub empty_reason: Option<EmptyReason>,
    pub message: Option<String>,
    pub columns: Vec<String>,
    /// Sorted ascending by glycemic load
    pub rows: Vec<FoodTableRow>,
    pub ignored_categories: Vec<String>,
}

/// Response for classify_glycemic_value
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub measure: GlycemicMeasure,
    pub value: f64,
    pub band: GlycemicBand,
    pub thresholds: Thresholds,
}

/// Response for generate_glycemic_chart
#[derive(Debug, Serialize)]
pub struct GenerateChartResponse {
    pub success: bool,
    pub file_path: String,
    pub serving_size_g: f64,
    pub foods: usize,
    pub bytes: usize,
    pub message: String,
}

/// Convert an optional category list into a selection set
pub fn selection(categories: Option<Vec<String>>) -> Option<BTreeSet<String>> {
    categories.map(|list| {
        list.into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    })
}

/// Default file name for generated output, e.g. `glycemic_150g_20260118-093000.pdf`
pub fn default_output_path(output_dir: &Path, serving_size_g: f64, extension: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    output_dir.join(format!("glycemic_{}g_{}.{}", serving_size_g, stamp, extension))
}

/// List food categories with their food counts
pub fn list_categories() -> ListCategoriesResponse {
    let categories: Vec<CategorySummary> = categories(CATALOG)
        .into_iter()
        .map(|name| CategorySummary {
            name: name.to_string(),
            foods: CATALOG.iter().filter(|item| item.category == name).count(),
        })
        .collect();
    let total = categories.len();

    ListCategoriesResponse { categories, total }
}

/// List catalog foods, optionally restricted to one category (case-insensitive)
pub fn list_foods(category: Option<&str>) -> ListFoodsResponse {
    let items: Vec<FoodSummary> = CATALOG
        .iter()
        .filter(|item| match category {
            Some(c) => item.category.eq_ignore_ascii_case(c.trim()),
            None => true,
        })
        .map(FoodSummary::from)
        .collect();
    let total = items.len();

    ListFoodsResponse { items, total }
}

/// One food scaled to a serving size. Exact name match first, then case-insensitive.
pub fn get_food(name: &str, serving_size_g: f64) -> GlResult<FoodDetailResponse> {
    let serving_size_g = validate_serving_size(serving_size_g)?;
    let name = name.trim();
    let item = find(CATALOG, name)
        .or_else(|| CATALOG.iter().find(|item| item.name.eq_ignore_ascii_case(name)))
        .ok_or_else(|| GlError::UnknownFood(name.to_string()))?;

    Ok(FoodDetailResponse {
        food: FoodSummary::from(item),
        serving: compute_serving(item, serving_size_g),
    })
}

/// Compute the sorted glycemic table for a serving size and category selection
pub fn calculate_glycemic_load(
    serving_size_g: f64,
    categories: Option<Vec<String>>,
) -> GlResult<CalculateResponse> {
    let selected = selection(categories);
    let calculation = calculate(CATALOG, serving_size_g, selected.as_ref())?;
    let ignored_categories = calculation.ignored_categories().to_vec();

    let response = match calculation {
        Calculation::Ready { serving_size_g, results, .. } => {
            let table = table_rows(&results, serving_size_g);
            CalculateResponse {
                serving_size_g,
                empty: false,
                empty_reason: None,
                message: None,
                columns: table.columns,
                rows: table.rows,
                ignored_categories,
            }
        }
        Calculation::Empty { reason, .. } => CalculateResponse {
            serving_size_g,
            empty: true,
            empty_reason: Some(reason),
            message: Some(reason.message().to_string()),
            columns: Vec::new(),
            rows: Vec::new(),
            ignored_categories,
        },
    };

    Ok(response)
}

/// Classify a GI or GL value
pub fn classify_glycemic_value(measure: GlycemicMeasure, value: f64) -> GlResult<ClassifyResponse> {
    if !value.is_finite() || value < 0.0 {
        return Err(GlError::InvalidValue(value));
    }
    let thresholds = *Thresholds::for_measure(measure);

    Ok(ClassifyResponse {
        measure,
        value,
        band: classify(value, &thresholds),
        thresholds,
    })
}

/// Render the chart to `output_path` (or a generated name under `output_dir`)
pub fn generate_glycemic_chart(
    output_dir: &Path,
    serving_size_g: f64,
    categories: Option<Vec<String>>,
    output_path: Option<String>,
) -> Result<GenerateChartResponse, ReportError> {
    let selected = selection(categories);
    let (serving_size_g, results) = match calculate(CATALOG, serving_size_g, selected.as_ref())? {
        Calculation::Empty { reason, .. } => return Err(ReportError::EmptySelection(reason)),
        Calculation::Ready { serving_size_g, results, .. } => (serving_size_g, results),
    };

    let path = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(output_dir, serving_size_g, "png"));

    let bytes = write_glycemic_chart(&results, serving_size_g, &path).map_err(ReportError::Chart)?;

    Ok(GenerateChartResponse {
        success: true,
        file_path: path.display().to_string(),
        serving_size_g,
        foods: results.len(),
        bytes,
        message: format!("Chart of {} foods at {}g serving written", results.len(), serving_size_g),
    })
}

/// Write the PDF report to `output_path` (or a generated name under `output_dir`)
pub fn generate_report(
    output_dir: &Path,
    serving_size_g: f64,
    categories: Option<Vec<String>>,
    output_path: Option<String>,
    notes: Option<Vec<String>>,
) -> Result<GenerateReportResponse, ReportError> {
    let selected = selection(categories);
    let path = output_path
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(output_dir, serving_size_g, "pdf"));

    generate_glycemic_report(CATALOG, serving_size_g, selected.as_ref(), &path, notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_list_categories_counts() {
        let response = list_categories();
        assert_eq!(response.total, 7);
        let sweets = response.categories.iter().find(|c| c.name == "Sweets").unwrap();
        assert_eq!(sweets.foods, 5);
        let total: usize = response.categories.iter().map(|c| c.foods).sum();
        assert_eq!(total, CATALOG.len());
    }

    #[test]
    fn test_list_foods_filters_case_insensitively() {
        let response = list_foods(Some("legumes"));
        let names: Vec<&str> = response.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Kidney beans", "Lentils", "Chickpeas"]);
        assert_eq!(list_foods(None).total, CATALOG.len());
    }

    #[test]
    fn test_list_foods_flags_scale_outlier() {
        let response = list_foods(Some("Vegetables"));
        let flagged: Vec<&str> = response
            .items
            .iter()
            .filter(|i| i.exceeds_nominal_scale)
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(flagged, vec!["Baked Potato"]);
    }

    #[test]
    fn test_calculate_sorted_rows() {
        let response = calculate_glycemic_load(100.0, cats(&["Legumes"])).unwrap();
        assert!(!response.empty);
        let names: Vec<&str> = response.rows.iter().map(|r| r.food.as_str()).collect();
        // Sorted by GL: Lentils 6.4, Chickpeas 7.56, Kidney beans 21.0
        assert_eq!(names, vec!["Lentils", "Chickpeas", "Kidney beans"]);
        assert_eq!(response.columns[2], "Carbs per 100g (g)");
    }

    #[test]
    fn test_calculate_empty_selection() {
        let response = calculate_glycemic_load(100.0, Some(Vec::new())).unwrap();
        assert!(response.empty);
        assert_eq!(response.empty_reason, Some(EmptyReason::NoCategoriesSelected));
        assert!(response.rows.is_empty());
        assert!(response.message.unwrap().starts_with("No foods selected"));
    }

    #[test]
    fn test_calculate_trims_and_reports_unknown_categories() {
        let response = calculate_glycemic_load(100.0, cats(&[" Fruits ", "Meat"])).unwrap();
        assert_eq!(response.rows.len(), 3);
        assert_eq!(response.ignored_categories, vec!["Meat".to_string()]);
    }

    #[test]
    fn test_calculate_ignores_blank_categories() {
        let response = calculate_glycemic_load(100.0, cats(&["Legumes", "  ", ""])).unwrap();
        assert_eq!(response.rows.len(), 3);
        assert!(response.ignored_categories.is_empty());

        // Only blanks is the same as selecting nothing
        let response = calculate_glycemic_load(100.0, cats(&[" "])).unwrap();
        assert_eq!(response.empty_reason, Some(EmptyReason::NoCategoriesSelected));
        assert!(response.ignored_categories.is_empty());
    }

    #[test]
    fn test_get_food() {
        let response = get_food("Apple", 200.0).unwrap();
        assert_eq!(response.food.category, "Fruits");
        assert!((response.serving.carbs_for_serving - 28.0).abs() < 1e-9);
        assert!((response.serving.glycemic_load - 10.08).abs() < 1e-9);
        assert_eq!(response.serving.gl_band, GlycemicBand::Medium);

        let response = get_food("  white BREAD ", 100.0).unwrap();
        assert_eq!(response.food.name, "White bread");
        assert!((response.serving.glycemic_load - 36.75).abs() < 1e-9);
    }

    #[test]
    fn test_get_food_errors() {
        assert_eq!(
            get_food("Steak", 100.0).unwrap_err(),
            GlError::UnknownFood("Steak".to_string())
        );
        assert_eq!(
            get_food("Apple", 0.0).unwrap_err(),
            GlError::InvalidServingSize(0.0)
        );
    }

    #[test]
    fn test_calculate_invalid_serving() {
        assert_eq!(
            calculate_glycemic_load(0.0, None).unwrap_err(),
            GlError::InvalidServingSize(0.0)
        );
    }

    #[test]
    fn test_classify_value() {
        let response = classify_glycemic_value(GlycemicMeasure::Gl, 36.75).unwrap();
        assert_eq!(response.band, GlycemicBand::High);
        let response = classify_glycemic_value(GlycemicMeasure::Gi, 36.0).unwrap();
        assert_eq!(response.band, GlycemicBand::Low);
        assert_eq!(response.thresholds.low_max, 55.0);
        assert!(classify_glycemic_value(GlycemicMeasure::Gi, -1.0).is_err());
        assert!(classify_glycemic_value(GlycemicMeasure::Gl, f64::NAN).is_err());
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/tmp/out"), 150.0, "pdf");
        assert!(path.starts_with("/tmp/out"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("glycemic_150g_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn test_chart_not_written_for_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_glycemic_chart(dir.path(), 100.0, Some(Vec::new()), None).unwrap_err();
        assert!(matches!(err, ReportError::EmptySelection(EmptyReason::NoCategoriesSelected)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_chart_written_to_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let response = generate_glycemic_chart(dir.path(), 150.0, cats(&["Sweets"]), None).unwrap();
        assert!(response.success);
        assert_eq!(response.foods, 5);
        let path = PathBuf::from(&response.file_path);
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, response.bytes);
    }

    #[test]
    fn test_report_written_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("legumes.pdf");
        let response = generate_report(
            dir.path(),
            100.0,
            cats(&["Legumes"]),
            Some(path.display().to_string()),
            Some(vec!["Lunch options".to_string()]),
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.foods, 3);
        assert!(path.exists());
    }
}
