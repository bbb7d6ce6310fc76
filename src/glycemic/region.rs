//! Chart geometry
//!
//! Axis ranges and the shaded "high glycemic load" region of the
//! carbs-vs-GI scatter chart. For a fixed load L the boundary is the
//! hyperbola `gi = L * 100 / carbs`; every point above it has GL > L.

use serde::Serialize;

use crate::models::ServingResult;

/// Glycemic load above which the chart region is shaded
pub const HIGH_LOAD_GL: f64 = 25.0;

/// Number of x samples along the boundary curve
pub const BOUNDARY_SAMPLES: usize = 1000;

/// Fixed GI axis range, identical for every selection
pub const GI_AXIS_MIN: f64 = 1.0;
pub const GI_AXIS_MAX: f64 = 120.0;

/// Minimum extent of the carbohydrate axis
pub const CARBS_AXIS_MIN_EXTENT: f64 = 90.0;

/// Boundary points at or above this GI are dropped
const BOUNDARY_GI_CUTOFF: f64 = 200.0;

/// Lower bound for the top edge of the shaded polygon
const REGION_TOP_MIN: f64 = 1000.0;

fn max_carbs(results: &[ServingResult]) -> f64 {
    results.iter().map(|r| r.carbs_for_serving).fold(0.0, f64::max)
}

fn max_gi(results: &[ServingResult]) -> f64 {
    results.iter().map(|r| r.glycemic_index).fold(0.0, f64::max)
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Axis ranges and annotation anchor for a set of results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub carbs_max: f64,
    pub gi_min: f64,
    pub gi_max: f64,
    /// Position of the "High glycemic load" label, in data coordinates
    pub annotation: (f64, f64),
}

impl ChartLayout {
    pub fn for_results(results: &[ServingResult]) -> Self {
        let carbs_max = CARBS_AXIS_MIN_EXTENT.max(max_carbs(results) + 10.0);
        Self {
            carbs_max,
            gi_min: GI_AXIS_MIN,
            gi_max: GI_AXIS_MAX,
            annotation: (0.75 * carbs_max, 110.0),
        }
    }

    pub fn annotation_text() -> String {
        format!("High glycemic load (>{})", HIGH_LOAD_GL)
    }
}

/// The shaded region where GL exceeds [`HIGH_LOAD_GL`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighLoadRegion {
    /// Sampled boundary curve, ascending in carbs
    pub boundary: Vec<(f64, f64)>,
    /// GI of the polygon's top edge
    pub top: f64,
}

impl HighLoadRegion {
    /// Build the region for the given results.
    ///
    /// Returns `None` when no boundary sample lands inside `(0, 200)` GI.
    pub fn for_results(results: &[ServingResult]) -> Option<Self> {
        let x_end = CARBS_AXIS_MIN_EXTENT.max(max_carbs(results) * 1.2);

        let boundary: Vec<(f64, f64)> = linspace(0.0, x_end, BOUNDARY_SAMPLES)
            .into_iter()
            .map(|x| (x, HIGH_LOAD_GL * 100.0 / x))
            .filter(|(_, y)| y.is_finite() && *y > 0.0 && *y < BOUNDARY_GI_CUTOFF)
            .collect();

        if boundary.is_empty() {
            return None;
        }

        Some(Self {
            boundary,
            top: REGION_TOP_MIN.max(max_gi(results) * 1.2),
        })
    }

    /// Closed outline: the boundary, then up to the top edge and back
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        let mut points = self.boundary.clone();
        if let (Some(&(first_x, _)), Some(&(last_x, _))) = (self.boundary.first(), self.boundary.last()) {
            points.push((last_x, self.top));
            points.push((first_x, self.top));
        }
        points
    }

    /// Outline with GI clamped to `gi_max`, for backends that draw off-canvas points poorly
    pub fn clipped_polygon(&self, gi_max: f64) -> Vec<(f64, f64)> {
        self.polygon()
            .into_iter()
            .map(|(x, y)| (x, y.min(gi_max)))
            .collect()
    }

    /// True when a (carbs, GI) point lies strictly inside the shaded region
    pub fn contains(&self, carbs: f64, gi: f64) -> bool {
        carbs > 0.0 && gi * carbs / 100.0 > HIGH_LOAD_GL && gi < self.top
    }
}
