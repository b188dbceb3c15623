//! bhocalc tools module
//!
//! MCP tool implementations for the BHO THC calculator.

pub mod calculator;
pub mod status;
