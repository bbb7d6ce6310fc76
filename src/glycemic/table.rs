//! Food data table
//!
//! The tabular view of a calculation: one row per food, sorted by glycemic
//! load, with display rounding applied after sorting.

use serde::Serialize;

use super::calculator::sort_by_glycemic_load;
use crate::models::{GlycemicBand, ServingResult};

/// A display row of the food table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodTableRow {
    pub food: String,
    pub category: String,
    pub glycemic_index: f64,
    /// Rounded to one decimal
    pub carbs_for_serving: f64,
    /// Rounded to one decimal
    pub glycemic_load: f64,
    pub gi_band: GlycemicBand,
    pub gl_band: GlycemicBand,
}

/// Rows plus their column headers
#[derive(Debug, Clone, Serialize)]
pub struct FoodTable {
    pub serving_size_g: f64,
    pub columns: Vec<String>,
    pub rows: Vec<FoodTableRow>,
}

/// Round half away from zero to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Header of the carbohydrate column, e.g. `Carbs per 150g (g)`
pub fn carbs_column_header(serving_size_g: f64) -> String {
    format!("Carbs per {}g (g)", serving_size_g)
}

/// Build the table from results in any order.
///
/// Sorting uses the unrounded glycemic load so that rounding never reorders rows.
pub fn table_rows(results: &[ServingResult], serving_size_g: f64) -> FoodTable {
    let rows = sort_by_glycemic_load(results.to_vec())
        .into_iter()
        .map(|r| FoodTableRow {
            food: r.name,
            category: r.category,
            glycemic_index: r.glycemic_index,
            carbs_for_serving: round1(r.carbs_for_serving),
            glycemic_load: round1(r.glycemic_load),
            gi_band: r.gi_band,
            gl_band: r.gl_band,
        })
        .collect();

    FoodTable {
        serving_size_g,
        columns: vec![
            "Food".to_string(),
            "Glycemic Index".to_string(),
            carbs_column_header(serving_size_g),
            "Glycemic Load".to_string(),
            "GI Band".to_string(),
            "GL Band".to_string(),
        ],
        rows,
    }
}

impl FoodTable {
    /// Cells of a row, formatted for display, in column order
    pub fn cells(row: &FoodTableRow) -> Vec<String> {
        vec![
            row.food.clone(),
            format!("{}", row.glycemic_index),
            format!("{:.1}", row.carbs_for_serving),
            format!("{:.1}", row.glycemic_load),
            row.gi_band.to_string(),
            row.gl_band.to_string(),
        ]
    }

    /// Render as a fixed-width plain-text table
    pub fn render_text(&self) -> String {
        let body: Vec<Vec<String>> = self.rows.iter().map(Self::cells).collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for cells in &body {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let format_line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, width))| {
                    // Food names left-aligned, numbers right-aligned
                    if i == 0 || i >= 4 {
                        format!("{:<width$}", cell, width = width)
                    } else {
                        format!("{:>width$}", cell, width = width)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format_line(&self.columns));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for cells in &body {
            out.push_str(&format_line(cells));
            out.push('\n');
        }
        out
    }
}
