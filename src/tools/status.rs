//! Status Tool
//!
//! Runtime status of the service and the glycemic reference guide.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::{categories, CATALOG};

/// Reference guide returned by the `glycemic_guide` tool
pub const GLYCEMIC_GUIDE: &str = r#"
# Glycemic Index and Glycemic Load

## What is the Glycemic Index?

The **Glycemic Index (GI)** is a measure of how quickly a food raises blood sugar
levels compared to pure glucose (GI 100).

- Low GI: 55 or less
- Medium GI: 56-69
- High GI: 70 or higher

Foods with a lower glycemic index are generally better for blood sugar management.

## What is the Glycemic Load?

**Glycemic Load (GL)** combines the GI of a food with the amount eaten:

    GL = (GI x Carbs per serving) / 100

- Low GL: 10 or less
- Medium GL: 11-19
- High GL: 20 or higher

It is recommended to keep the GL of most meals under 25 and the sum of all GLs for
a day under 100. The chart shades the region where a serving exceeds GL 25.

## Why is there no meat or fish?

Meat and fish contain no carbohydrate, so they have a GI of 0 and do not raise the
blood sugar level.

## Using the tools

1. `list_categories` to see the food groups.
2. `calculate_glycemic_load` with `serving_size_g` (grams, 50-500 typical, default 100)
   and optionally `categories`. Results are sorted from lowest to highest GL.
3. `generate_glycemic_chart` / `generate_glycemic_report` to produce a PNG chart or a
   PDF report for the same inputs.

Selecting no categories is not an error: the result is reported as empty and no
chart or report is produced.

Note: Baked Potato is listed with GI 111, above the nominal 0-100 scale. The value
is kept as published and flagged as a possible data error.
"#;

/// Service status
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub output_dir: String,
    pub catalog_foods: usize,
    pub catalog_categories: usize,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker
pub struct StatusTracker {
    start_time: Instant,
    output_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            output_dir,
        }
    }

    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            output_dir: self.output_dir.display().to_string(),
            catalog_foods: CATALOG.len(),
            catalog_categories: categories(CATALOG).len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
