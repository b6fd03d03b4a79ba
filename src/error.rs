//! Error handling for the resume analyzer application

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload rejected: {0}")]
    RejectedUpload(RejectReason),

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Export generation failed: {0}")]
    ExportGeneration(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

/// Why the acceptance gate turned a file away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NotPdf,
    TooSmall { size: u64, min: u64 },
    TooLarge { size: u64, max: u64 },
    NotAResume,
}

impl RejectReason {
    /// Short machine-friendly tag, e.g. `size-too-small`
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::NotPdf => "not-pdf",
            RejectReason::TooSmall { .. } => "size-too-small",
            RejectReason::TooLarge { .. } => "size-too-large",
            RejectReason::NotAResume => "not-a-resume",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotPdf => write!(f, "please upload a PDF file only"),
            RejectReason::TooSmall { size, min } => {
                write!(f, "file is too small ({} bytes, minimum {} bytes)", size, min)
            }
            RejectReason::TooLarge { size, max } => {
                write!(f, "file is too large ({} bytes, maximum {} bytes)", size, max)
            }
            RejectReason::NotAResume => write!(f, "this PDF does not look like a resume"),
        }
    }
}

impl From<RejectReason> for ResumeAnalyzerError {
    fn from(reason: RejectReason) -> Self {
        ResumeAnalyzerError::RejectedUpload(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_codes() {
        assert_eq!(RejectReason::TooSmall { size: 500, min: 1024 }.code(), "size-too-small");
        assert_eq!(RejectReason::NotPdf.code(), "not-pdf");
    }

    #[test]
    fn test_rejection_message() {
        let err: ResumeAnalyzerError = RejectReason::TooSmall { size: 500, min: 1024 }.into();
        assert_eq!(
            err.to_string(),
            "Upload rejected: file is too small (500 bytes, minimum 1024 bytes)"
        );
    }
}
