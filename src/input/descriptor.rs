//! Metadata-only view of an uploaded file

use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";

/// The three properties the analysis reads, plus the caller's claimed MIME type.
///
/// Contents are deliberately absent: two files with identical metadata are
/// indistinguishable to everything downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub byte_size: u64,
    pub last_modified_millis: u64,
    pub declared_type: Option<String>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, byte_size: u64, last_modified_millis: u64) -> Self {
        Self {
            name: name.into(),
            byte_size,
            last_modified_millis,
            declared_type: None,
        }
    }

    pub fn with_declared_type(mut self, mime: impl Into<String>) -> Self {
        self.declared_type = Some(mime.into());
        self
    }

    /// Name length in UTF-16 code units
    pub fn name_units(&self) -> u64 {
        self.name.encode_utf16().count() as u64
    }

    pub fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn is_pdf_typed(&self) -> bool {
        self.declared_type.as_deref() == Some(PDF_MIME) || self.lowercase_name().ends_with(".pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_units_counts_utf16() {
        assert_eq!(UploadedFile::new("cv.pdf", 0, 0).name_units(), 6);
        // 'é' is one unit, the emoji is a surrogate pair
        assert_eq!(UploadedFile::new("é😀", 0, 0).name_units(), 3);
    }

    #[test]
    fn test_pdf_typing() {
        assert!(UploadedFile::new("Resume.PDF", 1, 1).is_pdf_typed());
        assert!(UploadedFile::new("resume", 1, 1).with_declared_type(PDF_MIME).is_pdf_typed());
        assert!(!UploadedFile::new("resume.docx", 1, 1).is_pdf_typed());
    }
}
