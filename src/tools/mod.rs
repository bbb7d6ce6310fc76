//! Glycemic Load Calculator tools module
//!
//! Tool implementations behind the MCP server and the CLI.

pub mod charts;
pub mod glycemic;
pub mod reports;
pub mod status;
