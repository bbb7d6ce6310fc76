//! Glycemic chart rendering
//!
//! Draws the carbs-vs-GI scatter chart (points colored by glycemic load,
//! shaded high-load region, one label per food) and encodes it as PNG.

use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use tracing::info;

use crate::glycemic::{ChartLayout, HighLoadRegion};
use crate::models::ServingResult;

pub const DEFAULT_CHART_WIDTH: u32 = 1000;
pub const DEFAULT_CHART_HEIGHT: u32 = 600;

/// GL range mapped onto the color scale
pub const GL_COLOR_MIN: f64 = 1.0;
pub const GL_COLOR_MAX: f64 = 100.0;

/// Yellow-Orange-Red sequential scale, light to dark
const YL_OR_RD: [(u8, u8, u8); 9] = [
    (255, 255, 204),
    (255, 237, 160),
    (254, 217, 118),
    (254, 178, 76),
    (253, 141, 60),
    (252, 78, 42),
    (227, 26, 28),
    (189, 0, 38),
    (128, 0, 38),
];

const COLOR_REGION: (u8, u8, u8) = (255, 0, 0);
const COLOR_MARKER_OUTLINE: (u8, u8, u8) = (90, 90, 90);
const COLOR_LABEL: (u8, u8, u8) = (0, 0, 0);
const COLOR_LABEL_HIGH_LOAD: (u8, u8, u8) = (160, 0, 0);

/// Color of a point with the given glycemic load.
///
/// Values outside `[GL_COLOR_MIN, GL_COLOR_MAX]` are clamped.
pub fn gl_color(glycemic_load: f64) -> (u8, u8, u8) {
    let t = ((glycemic_load - GL_COLOR_MIN) / (GL_COLOR_MAX - GL_COLOR_MIN)).clamp(0.0, 1.0);
    let scaled = t * (YL_OR_RD.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(YL_OR_RD.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * frac).round() as u8 };
    let (a, b) = (YL_OR_RD[lower], YL_OR_RD[upper]);
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Label color of a point: dark red inside the shaded high-load region
pub fn label_color(region: Option<&HighLoadRegion>, result: &ServingResult) -> (u8, u8, u8) {
    match region {
        Some(region) if region.contains(result.carbs_for_serving, result.glycemic_index) => {
            COLOR_LABEL_HIGH_LOAD
        }
        _ => COLOR_LABEL,
    }
}

/// Label of the carbohydrate axis
pub fn carbs_axis_label(serving_size_g: f64) -> String {
    format!("Carbohydrates for {}g serving (g)", serving_size_g)
}

/// Render the scatter chart as PNG bytes
pub fn generate_glycemic_chart(
    results: &[ServingResult],
    serving_size_g: f64,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if results.is_empty() {
        return Err("No data to chart".to_string());
    }

    let layout = ChartLayout::for_results(results);
    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Glycemic Index and Load", ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(0.0..layout.carbs_max, layout.gi_min..layout.gi_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_desc(carbs_axis_label(serving_size_g))
            .y_desc("Glycemic Index")
            .draw()
            .map_err(|e| e.to_string())?;

        // High-load region, clamped to the visible GI range
        let region = HighLoadRegion::for_results(results);
        if let Some(region) = &region {
            let (r, g, b) = COLOR_REGION;
            chart
                .draw_series(std::iter::once(Polygon::new(
                    region.clipped_polygon(layout.gi_max),
                    RGBColor(r, g, b).mix(0.1),
                )))
                .map_err(|e| e.to_string())?;
        }

        let (ax, ay) = layout.annotation;
        chart
            .draw_series(std::iter::once(Text::new(
                ChartLayout::annotation_text(),
                (ax, ay),
                ("sans-serif", 16).into_font().color(&RED),
            )))
            .map_err(|e| e.to_string())?;

        let (or, og, ob) = COLOR_MARKER_OUTLINE;
        chart
            .draw_series(results.iter().map(|result| {
                let (r, g, b) = gl_color(result.glycemic_load);
                let (lr, lg, lb) = label_color(region.as_ref(), result);
                EmptyElement::at((result.carbs_for_serving, result.glycemic_index))
                    + Circle::new((0, 0), 7, RGBColor(r, g, b).filled())
                    + Circle::new((0, 0), 7, RGBColor(or, og, ob).stroke_width(1))
                    + Text::new(
                        result.name.clone(),
                        (9, -16),
                        ("sans-serif", 11).into_font().color(&RGBColor(lr, lg, lb)),
                    )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer).ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Render the chart and write it to `output_path`, creating parent directories
pub fn write_glycemic_chart(
    results: &[ServingResult],
    serving_size_g: f64,
    output_path: &Path,
) -> Result<usize, String> {
    let png = generate_glycemic_chart(results, serving_size_g, DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(output_path, &png).map_err(|e| e.to_string())?;

    info!(path = %output_path.display(), bytes = png.len(), "Chart written");
    Ok(png.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find, CATALOG};
    use crate::glycemic::compute_serving;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn results(serving: f64) -> Vec<ServingResult> {
        CATALOG.iter().map(|i| compute_serving(i, serving)).collect()
    }

    #[test]
    fn test_gl_color_endpoints() {
        assert_eq!(gl_color(GL_COLOR_MIN), (255, 255, 204));
        assert_eq!(gl_color(GL_COLOR_MAX), (128, 0, 38));
    }

    #[test]
    fn test_gl_color_clamps() {
        assert_eq!(gl_color(-5.0), gl_color(GL_COLOR_MIN));
        assert_eq!(gl_color(250.0), gl_color(GL_COLOR_MAX));
    }

    #[test]
    fn test_gl_color_darkens_with_load() {
        // Red and green channels never increase along the scale
        let mut previous = gl_color(GL_COLOR_MIN);
        for gl in (2..=100).map(|v| v as f64) {
            let current = gl_color(gl);
            assert!(current.0 <= previous.0, "red rose at {}", gl);
            assert!(current.1 <= previous.1, "green rose at {}", gl);
            previous = current;
        }
    }

    #[test]
    fn test_carbs_axis_label() {
        assert_eq!(carbs_axis_label(150.0), "Carbohydrates for 150g serving (g)");
    }

    #[test]
    fn test_chart_requires_data() {
        assert_eq!(
            generate_glycemic_chart(&[], 100.0, 200, 100),
            Err("No data to chart".to_string())
        );
    }

    #[test]
    fn test_label_color_marks_high_load_foods() {
        let all = results(100.0);
        let region = HighLoadRegion::for_results(&all);
        let bread = compute_serving(find(CATALOG, "White bread").unwrap(), 100.0);
        let yogurt = compute_serving(find(CATALOG, "Plain yogurt").unwrap(), 100.0);

        assert_eq!(label_color(region.as_ref(), &bread), COLOR_LABEL_HIGH_LOAD);
        assert_eq!(label_color(region.as_ref(), &yogurt), COLOR_LABEL);
        assert_eq!(label_color(None, &bread), COLOR_LABEL);
    }

    #[test]
    fn test_chart_renders_png() {
        let png = generate_glycemic_chart(&results(500.0), 500.0, DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)
            .unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert_eq!(&png[..8], &PNG_MAGIC[..]);
    }

    #[test]
    fn test_write_chart_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("all.png");

        let bytes = write_glycemic_chart(&results(100.0), 100.0, &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), bytes);
        assert_eq!(&written[..8], &PNG_MAGIC[..]);
    }
}
