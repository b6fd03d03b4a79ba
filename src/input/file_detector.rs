//! File type detection

use crate::input::descriptor::PDF_MIME;

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            _ => FileType::Unknown,
        }
    }

    /// MIME type a browser would declare for this kind of file
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            FileType::Pdf => Some(PDF_MIME),
            FileType::Unknown => None,
        }
    }
}
