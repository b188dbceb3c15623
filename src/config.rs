//! Runtime configuration
//!
//! Read from the environment at startup.

use std::path::{Path, PathBuf};

use crate::extraction::REPORT_FILE_NAME;

pub const EXPORT_DIR_VAR: &str = "BHOCALC_EXPORT_DIR";
pub const REPORT_FILE_VAR: &str = "BHOCALC_REPORT_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory exported reports are written into
    pub export_dir: PathBuf,
    /// File name used when an export does not name one
    pub report_file_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let export_dir = lookup(EXPORT_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_export_dir);

        let report_file_name = lookup(REPORT_FILE_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| REPORT_FILE_NAME.to_string());

        Self {
            export_dir,
            report_file_name,
        }
    }
}

/// `exports/` next to the project root when running from target/{debug,release}
fn default_export_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = exe_dir;
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(root) = path.parent().and_then(Path::parent) {
            path = root.to_path_buf();
        }
    }

    path.push("exports");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(|key| match key {
            EXPORT_DIR_VAR => Some("/tmp/bho".to_string()),
            REPORT_FILE_VAR => Some(" batch-7.txt ".to_string()),
            _ => None,
        });
        assert_eq!(config.export_dir, PathBuf::from("/tmp/bho"));
        assert_eq!(config.report_file_name, "batch-7.txt");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.report_file_name, "BHO-THC-Rechner.txt");
        assert!(config.export_dir.ends_with("exports"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.report_file_name, REPORT_FILE_NAME);
        assert!(config.export_dir.ends_with("exports"));
    }
}
