//! Build script for the Glycemic Load Calculator
//!
//! Bumps the persistent build counter and embeds it, with a UTC timestamp,
//! as compile-time environment variables.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build = read_build_number(path) + 1;

    // A read-only checkout still builds, it just keeps reporting the same number
    if let Err(e) = fs::write(path, build.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=GLYCEMIC_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=GLYCEMIC_BUILD_TIMESTAMP={}", timestamp);
}
