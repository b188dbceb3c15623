//! BHO THC Rechner (bhocalc) Library
//!
//! Estimates THC content of butane hash oil extracts and of oils infused
//! with them, and renders the results as a plain-text report.

pub mod build_info;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod mcp;
pub mod models;
pub mod session;
pub mod tools;
