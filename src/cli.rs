//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Deterministic resume analysis reports from PDF uploads")]
#[command(long_about = "Admit a PDF resume, derive a seed from its metadata and synthesise a reproducible report: score, strengths, improvements, skills and ranked career paths")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a PDF resume and print its analysis
    Analyze {
        /// Path to the resume (PDF)
        file: PathBuf,

        /// Output format: console, text, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save the export to this path
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include required skills and report diagnostics
        #[arg(short, long)]
        detailed: bool,

        /// Analyse immediately, bypassing the acceptance gate and upload delay
        #[arg(long)]
        skip_gate: bool,
    },

    /// Analyse synthetic file metadata without touching the filesystem
    Inspect {
        /// File name as uploaded
        #[arg(long)]
        name: String,

        /// Size in bytes
        #[arg(long)]
        size: u64,

        /// Last-modified time in milliseconds since the epoch
        #[arg(long, default_value_t = 0)]
        modified: u64,

        /// Output format: console, text, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save the export to this path
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include required skills and report diagnostics
        #[arg(short, long)]
        detailed: bool,
    },

    /// Run only the acceptance gate against a file
    Check {
        /// Path to the candidate file
        file: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, text, json, markdown, html, pdf",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("txt"), Ok(OutputFormat::Text));
        assert_eq!(parse_output_format("pdf"), Ok(OutputFormat::Pdf));
        assert!(parse_output_format("docx").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf"]).is_err());
        assert_eq!(
            validate_file_extension(Path::new("README"), &["pdf"]),
            Err("File has no extension".to_string())
        );
    }

    #[test]
    fn test_inspect_arguments() {
        let cli = Cli::try_parse_from([
            "resume-analyzer",
            "inspect",
            "--name",
            "resume_john.pdf",
            "--size",
            "120000",
            "--modified",
            "1700000000000",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Inspect { name, size, modified, output, save, detailed } => {
                assert_eq!(name, "resume_john.pdf");
                assert_eq!(size, 120_000);
                assert_eq!(modified, 1_700_000_000_000);
                assert_eq!(output.as_deref(), Some("json"));
                assert!(save.is_none());
                assert!(!detailed);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["resume-analyzer", "config", "path", "-v", "-c", "/tmp/alt.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/alt.toml")));
        assert!(matches!(cli.command, Commands::Config { action: Some(ConfigAction::Path) }));
    }

    #[test]
    fn test_analyze_requires_file() {
        assert!(Cli::try_parse_from(["resume-analyzer", "analyze"]).is_err());
    }
}
