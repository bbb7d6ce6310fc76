//! Glycemic Load Calculator
//!
//! An MCP server for glycemic index and glycemic load of common foods.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use glycemic_load::catalog::{data_warnings, CATALOG};
use glycemic_load::{build_info, config, mcp::GlycemicService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays reserved for MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("glycemic_load=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let output_dir = config::get_output_dir();
    eprintln!("Output directory: {}", output_dir.display());
    std::fs::create_dir_all(&output_dir)?;

    info!(foods = CATALOG.len(), "Catalog loaded");
    for warning in data_warnings(CATALOG) {
        warn!("{}", warning);
    }

    let service = GlycemicService::new(output_dir);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
