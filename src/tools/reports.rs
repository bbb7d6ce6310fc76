//! Report generation tools
//!
//! Generate a PDF glycemic report: summary and food table on a portrait page,
//! the scatter chart on a landscape page.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::data_warnings;
use crate::glycemic::{
    calculate, table_rows, Calculation, EmptyReason, GlError, FoodTable, GI_THRESHOLDS,
    GL_THRESHOLDS, HIGH_LOAD_GL,
};
use crate::models::{FoodItem, GlycemicBand};
use crate::tools::charts::generate_glycemic_chart;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_TITLE: (u8, u8, u8) = (192, 0, 0);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);
const COLOR_WARNING: (u8, u8, u8) = (255, 120, 0);

// ============================================================================
// Errors and Response Types
// ============================================================================

/// Errors raised while producing charts or reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    EmptySelection(EmptyReason),

    #[error(transparent)]
    Calculation(#[from] GlError),

    #[error("Chart generation failed: {0}")]
    Chart(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    pub file_path: String,
    pub serving_size_g: f64,
    pub foods: usize,
    pub categories: Vec<String>,
    pub message: String,
}

/// Count of rows per GL band
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl BandCounts {
    pub fn from_table(table: &FoodTable) -> Self {
        let mut counts = Self::default();
        for row in &table.rows {
            match row.gl_band {
                GlycemicBand::Low => counts.low += 1,
                GlycemicBand::Medium => counts.medium += 1,
                GlycemicBand::High => counts.high += 1,
            }
        }
        counts
    }
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.use_text(text, size, x, y, font);
}

fn add_rule(layer: &PdfLayerReference, x1: Mm, x2: Mm, y: Mm, color: (u8, u8, u8), width: f32) {
    layer.set_outline_color(rgb_to_printpdf(color.0, color.1, color.2));
    layer.set_outline_thickness(width);

    layer.add_line(Line {
        points: vec![(Point::new(x1, y), false), (Point::new(x2, y), false)],
        is_closed: false,
    });
}

fn pdf_err(e: printpdf::Error) -> ReportError {
    ReportError::Pdf(e.to_string())
}

// ============================================================================
// Glycemic Report Generation
// ============================================================================

/// Generate the glycemic report PDF at `output_path`.
///
/// An empty selection produces no file and returns [`ReportError::EmptySelection`].
pub fn generate_glycemic_report(
    catalog: &[FoodItem],
    serving_size_g: f64,
    selected: Option<&BTreeSet<String>>,
    output_path: &Path,
    notes: Option<Vec<String>>,
) -> Result<GenerateReportResponse, ReportError> {
    let calculation = calculate(catalog, serving_size_g, selected)?;
    let (serving_size_g, results) = match calculation {
        Calculation::Empty { reason, .. } => return Err(ReportError::EmptySelection(reason)),
        Calculation::Ready { serving_size_g, results, .. } => (serving_size_g, results),
    };

    let table = table_rows(&results, serving_size_g);
    let counts = BandCounts::from_table(&table);
    let categories: Vec<String> = results
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Page 1 - Portrait
    let (doc, page1, layer1) = PdfDocument::new(
        "Glycemic Index and Load Report",
        Mm(215.9), // Letter width
        Mm(279.4), // Letter height
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let layer = doc.get_page(page1).get_layer(layer1);

    let page_height = 279.4;
    let margin_left = 15.0;
    let mut y = page_height - 20.0;

    add_text(&layer, &font_bold, "Glycemic Index and Load Report", Mm(margin_left), Mm(y), 18.0, COLOR_TITLE);
    y -= 10.0;

    add_text(&layer, &font, &format!("Serving size: {}g", serving_size_g), Mm(margin_left), Mm(y), 11.0, COLOR_BLACK);
    let now = chrono::Local::now().format("%Y-%m-%d").to_string();
    add_text(&layer, &font, &format!("Generated: {}", now), Mm(120.0), Mm(y), 11.0, COLOR_BLACK);
    y -= 6.0;

    add_text(&layer, &font, &format!("Categories: {}", categories.join(", ")), Mm(margin_left), Mm(y), 10.0, COLOR_BLACK);
    y -= 8.0;

    add_rule(&layer, Mm(margin_left), Mm(200.0), Mm(y), COLOR_GRAY, 0.5);
    y -= 8.0;

    // Summary
    add_text(&layer, &font_bold, "Summary", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    add_text(&layer, &font, &format!("Foods: {}", table.rows.len()), Mm(margin_left), Mm(y), 10.0, COLOR_BLACK);
    add_text(&layer, &font, &format!("Low GL: {}", counts.low), Mm(60.0), Mm(y), 10.0, GlycemicBand::Low.color());
    add_text(&layer, &font, &format!("Medium GL: {}", counts.medium), Mm(100.0), Mm(y), 10.0, GlycemicBand::Medium.color());
    add_text(&layer, &font, &format!("High GL: {}", counts.high), Mm(145.0), Mm(y), 10.0, GlycemicBand::High.color());
    y -= 6.0;

    add_text(
        &layer,
        &font,
        &format!(
            "GI bands: low <= {}, high >= {}.  GL bands: low <= {}, high >= {}.",
            GI_THRESHOLDS.low_max, GI_THRESHOLDS.high_min, GL_THRESHOLDS.low_max, GL_THRESHOLDS.high_min
        ),
        Mm(margin_left),
        Mm(y),
        9.0,
        COLOR_GRAY,
    );
    y -= 12.0;

    // Food table
    add_text(&layer, &font_bold, "Food Data Table", Mm(margin_left), Mm(y), 12.0, COLOR_BLACK);
    y -= 7.0;

    let col_widths = [50.0, 28.0, 36.0, 28.0, 22.0, 22.0];
    let mut col_x = margin_left;
    for (i, header) in table.columns.iter().enumerate() {
        add_text(&layer, &font_bold, header, Mm(col_x), Mm(y), 8.0, COLOR_BLACK);
        col_x += col_widths[i];
    }
    y -= 5.0;

    for row in &table.rows {
        col_x = margin_left;
        for (i, value) in FoodTable::cells(row).iter().enumerate() {
            let color = match i {
                1 | 4 => row.gi_band.color(),
                3 | 5 => row.gl_band.color(),
                _ => COLOR_BLACK,
            };
            add_text(&layer, &font, value, Mm(col_x), Mm(y), 8.0, color);
            col_x += col_widths[i];
        }
        y -= 4.5;
    }

    let warnings: Vec<String> = data_warnings(catalog)
        .into_iter()
        .filter(|w| table.rows.iter().any(|r| w.starts_with(&r.food)))
        .collect();
    if !warnings.is_empty() {
        y -= 6.0;
        add_text(&layer, &font_bold, "Data Notes", Mm(margin_left), Mm(y), 10.0, COLOR_WARNING);
        y -= 5.0;
        for warning in &warnings {
            add_text(&layer, &font, &format!("- {}", warning), Mm(margin_left), Mm(y), 8.0, COLOR_BLACK);
            y -= 4.5;
        }
    }

    // ========================================================================
    // Page 2 - Landscape for Chart
    // ========================================================================
    let (page2, layer2) = doc.add_page(Mm(279.4), Mm(215.9), "Chart Page");
    let layer2 = doc.get_page(page2).get_layer(layer2);

    let landscape_height = 215.9;
    let mut y2 = landscape_height - 20.0;

    add_text(&layer2, &font_bold, "Carbohydrates vs Glycemic Index", Mm(margin_left), Mm(y2), 16.0, COLOR_TITLE);
    add_text(&layer2, &font, &format!("{}g serving", serving_size_g), Mm(150.0), Mm(y2), 11.0, COLOR_BLACK);
    y2 -= 10.0;

    match generate_glycemic_chart(&results, serving_size_g, 1000, 600) {
        Ok(png_bytes) => {
            let dynamic_image = printpdf::image_crate::load_from_memory(&png_bytes)
                .map_err(|e| ReportError::Chart(e.to_string()))?;
            let pdf_image = Image::from_dynamic_image(&dynamic_image);

            // 1000x600 pixels at 130 DPI ~ 195mm x 117mm
            let transform = ImageTransform {
                translate_x: Some(Mm(margin_left)),
                translate_y: Some(Mm(y2 - 120.0)),
                dpi: Some(130.0),
                ..Default::default()
            };

            pdf_image.add_to_layer(layer2.clone(), transform);
            y2 -= 125.0;
        }
        Err(e) => {
            warn!(error = %e, "Chart could not be embedded in report");
            add_text(&layer2, &font, &format!("Chart generation error: {}", e), Mm(margin_left), Mm(y2 - 10.0), 9.0, COLOR_TITLE);
            y2 -= 15.0;
        }
    }

    y2 -= 5.0;
    add_text(&layer2, &font_bold, "Legend:", Mm(margin_left), Mm(y2), 10.0, COLOR_BLACK);
    add_text(&layer2, &font, "Point color = glycemic load (light yellow 1 to dark red 100)", Mm(40.0), Mm(y2), 10.0, COLOR_BLACK);
    y2 -= 6.0;
    add_text(
        &layer2,
        &font,
        &format!("Shaded area: high glycemic load (>{}). Keep most meals under {} GL and the daily total under 100.", HIGH_LOAD_GL, HIGH_LOAD_GL),
        Mm(40.0),
        Mm(y2),
        10.0,
        COLOR_TITLE,
    );
    y2 -= 10.0;

    if let Some(ref notes_list) = notes {
        if !notes_list.is_empty() {
            add_text(&layer2, &font_bold, "Notes", Mm(margin_left), Mm(y2), 12.0, COLOR_BLACK);
            y2 -= 6.0;

            for note in notes_list {
                add_text(&layer2, &font, &format!("- {}", note), Mm(margin_left), Mm(y2), 9.0, COLOR_BLACK);
                y2 -= 5.0;
            }
        }
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(pdf_err)?;

    info!(path = %output_path.display(), foods = table.rows.len(), "Report written");

    Ok(GenerateReportResponse {
        success: true,
        file_path: output_path.display().to_string(),
        serving_size_g,
        foods: table.rows.len(),
        categories,
        message: format!(
            "Glycemic report generated for {} foods at {}g serving",
            table.rows.len(),
            serving_size_g
        ),
    })
}
