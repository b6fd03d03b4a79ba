//! Input manager turning local paths into upload descriptors

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::descriptor::UploadedFile;
use crate::input::file_detector::FileType;
use log::debug;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tokio::fs;

/// Reads filesystem metadata only; file contents are never opened.
///
/// Every call stats the file again, so a rewritten file yields a fresh seed.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn describe(&self, path: &Path) -> Result<UploadedFile> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            ResumeAnalyzerError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ResumeAnalyzerError::InvalidInput(format!("Path has no file name: {}", path.display())))?;

        // Platforms without mtime report 0, which still yields a valid seed
        let last_modified_millis = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);

        let mut file = UploadedFile::new(name, metadata.len(), last_modified_millis);
        if let Some(mime) = self.detect_file_type(path).mime_type() {
            file = file.with_declared_type(mime);
        }

        debug!(
            "Described {}: {} bytes, modified at {} ms",
            path.display(),
            file.byte_size,
            file.last_modified_millis
        );

        Ok(file)
    }

    fn detect_file_type(&self, path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}
