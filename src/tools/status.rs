//! Status tool
//!
//! Provides runtime status information about the bhocalc service and the
//! usage guide returned by `calculator_instructions`.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage guide for AI assistants driving the calculator
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# BHO THC Rechner Instructions

Estimates how much THC ends up in a butane hash oil (BHO) extract and in an
oil the extract is dissolved in.

## Inputs

| Field | Unit | Default | Aliases |
|-------|------|---------|---------|
| `flower_weight` | g | 35 | `weight`, `flower_weight_g` |
| `thc_percent` | % | 32 | `thc` |
| `bho_yield_percent` | % | 20 | `yield`, `bho_yield` |
| `oil_volume` | ml | 500 | `oil`, `oil_volume_ml` |

- `set_input` changes one field and returns the recomputed estimate.
- `value` is in g / % / ml and may be a number or text. Text accepts a
  decimal comma ("0,5") and scientific notation ("1e3").
- Invalid values, and values so large that the estimate would overflow, are
  rejected and the previous value stays in place.
- `set_inputs` changes several fields at once (all or nothing).
- `reset_inputs` restores the defaults.

## Results

- `calculate` re-runs the estimate on the current inputs.
- `calculate_for` estimates arbitrary inputs without changing the session.
- `get_results` returns the display lines and the assumptions disclaimer.
- Values that would need a division by zero (no BHO yield, no oil) are
  `null` in JSON and "nicht definiert" in text.

## Report

- `get_report` returns the plain-text report.
- `export_report` saves it into the export directory. A failed save is
  reported with `success: false` and does not change any inputs.

## Assumptions

- 75 % of the flower's THC ends up in the extract.
- THC percentages on lab certificates vary by ±10 %. The concentration band
  is computed from THC% × 0.9 and THC% × 1.1.
- 20 drops ≈ 1 ml, one reference dose = 5 ml (a teaspoon).

All values are estimates.
"#;

/// Runtime status of the bhocalc service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    pub export_dir: String,
    pub export_dir_exists: bool,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    export_dir: PathBuf,
}

impl StatusTracker {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            export_dir,
        }
    }

    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            export_dir: self.export_dir.display().to_string(),
            export_dir_exists: self.export_dir.is_dir(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_export_dir() {
        let dir = std::env::temp_dir().join("bhocalc-status-missing-dir");
        let tracker = StatusTracker::new(dir.clone());
        let status = tracker.get_status();

        assert_eq!(status.export_dir, dir.display().to_string());
        assert!(!status.export_dir_exists);
        assert_eq!(status.process_id, std::process::id());
    }
}
