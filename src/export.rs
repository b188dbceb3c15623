//! Report export
//!
//! The file-save collaborator the controller hands finished reports to.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;

/// Destination for exported text files
pub trait FileSaver: Send + Sync {
    /// Save `content` as UTF-8 text under `filename`, returning where it was written
    fn save_text_file(&self, filename: &str, content: &str) -> Result<PathBuf, ExportError>;
}

/// Reject names that would escape the export directory
pub fn validate_file_name(filename: &str) -> Result<&str, ExportError> {
    let trimmed = filename.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
        || trimmed.contains('\0')
    {
        return Err(ExportError::InvalidFileName(filename.to_string()));
    }
    Ok(trimmed)
}

/// Saves files into a fixed directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save_text_file(&self, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
        let name = validate_file_name(filename)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(name);
        fs::write(&path, content.as_bytes())?;
        Ok(path)
    }
}
