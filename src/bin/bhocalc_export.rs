//! Utility to estimate one batch and write its report
//!
//! Usage: bhocalc_export [weight_g] [thc_percent] [yield_percent] [oil_ml]
//! Missing arguments fall back to the calculator defaults.

use bhocalc::config::Config;
use bhocalc::export::DirectorySaver;
use bhocalc::models::{CalculatorInputs, InputField};
use bhocalc::session::CalculatorSession;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let mut session = CalculatorSession::with_inputs(CalculatorInputs::default());

    for (field, arg) in InputField::ALL.into_iter().zip(std::env::args().skip(1)) {
        session.update_text(field, &arg)?;
    }

    for line in session.results() {
        println!("{}", line);
    }
    println!();
    println!("{}", session.disclaimer());

    let saver = DirectorySaver::new(&config.export_dir);
    let outcome = session.export(&saver, &config.report_file_name);
    if !outcome.success {
        return Err(outcome.message.into());
    }
    println!();
    println!("{}", outcome.message);

    Ok(())
}
