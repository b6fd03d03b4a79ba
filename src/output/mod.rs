//! Export rendering and saving

pub mod formatter;
pub mod pdf;
pub mod report;

pub use formatter::{save_export, suggest_filename, OutputFormatter, ReportGenerator};
pub use report::{ExportDocument, ExportSection, SECTION_ORDER};
