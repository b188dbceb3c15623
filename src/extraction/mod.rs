//! Extraction calculation module
//!
//! Estimation of THC content for BHO extracts and infused oils, input
//! parsing and text rendering of the results.

pub mod estimator;
pub mod input;
pub mod report;

pub use estimator::{estimate, estimate_finite};
pub use input::{ensure_finite, parse_number};
pub use report::{
    assumptions_disclaimer, format_report, format_results, REPORT_FILE_NAME, UNDEFINED_TEXT,
};
