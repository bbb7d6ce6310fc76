//! Glycemic Load Calculator Library
//!
//! Glycemic index and glycemic load of a fixed food catalog, scaled to a
//! serving size, with table, chart and report outputs.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod glycemic;
pub mod mcp;
pub mod models;
pub mod tools;
