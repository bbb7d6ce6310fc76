//! Glycemic classification bands

use serde::{Deserialize, Serialize};

/// Low / medium / high bucket for a GI or GL value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlycemicBand {
    Low,
    Medium,
    High,
}

impl GlycemicBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlycemicBand::Low => "low",
            GlycemicBand::Medium => "medium",
            GlycemicBand::High => "high",
        }
    }

    /// Display color (RGB 0-255) used by the chart legend and the PDF table
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            GlycemicBand::Low => (0, 176, 80),
            GlycemicBand::Medium => (255, 165, 0),
            GlycemicBand::High => (192, 0, 0),
        }
    }
}

impl std::fmt::Display for GlycemicBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which quantity a value measures, selecting the thresholds to classify with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlycemicMeasure {
    /// Glycemic index
    Gi,
    /// Glycemic load
    Gl,
}

impl GlycemicMeasure {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gi" | "index" | "glycemic_index" => Some(GlycemicMeasure::Gi),
            "gl" | "load" | "glycemic_load" => Some(GlycemicMeasure::Gl),
            _ => None,
        }
    }
}
