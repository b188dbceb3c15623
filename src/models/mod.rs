//! Data models
//!
//! Plain value records passed between the controller, estimator and formatter.

mod constants;
mod inputs;
mod outputs;

pub use constants::CalculatorConstants;
pub use inputs::{CalculatorInputs, InputField};
pub use outputs::{Band, CalculatorOutputs};
