//! Runtime configuration
//!
//! Settings come from environment variables, read once at startup.

use std::path::{Path, PathBuf};

/// Overrides the directory charts and reports are written to
pub const OUTPUT_DIR_ENV: &str = "GLYCEMIC_OUTPUT_DIR";

/// Project root when running from `target/{debug,release}`, else the executable's directory
fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path
}

/// Resolve the output directory from an optional override
pub fn resolve_output_dir(override_dir: Option<&str>) -> PathBuf {
    match override_dir.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => project_root().join("output"),
    }
}

/// Output directory from the environment or the default
pub fn get_output_dir() -> PathBuf {
    resolve_output_dir(std::env::var(OUTPUT_DIR_ENV).ok().as_deref())
}
