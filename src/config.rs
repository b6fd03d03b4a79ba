//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MIN_BYTES: u64 = 1024;
pub const STRICT_MIN_BYTES: u64 = 50_000;
pub const MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upload: UploadConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Raise the minimum size from 1 KiB to 50 KB
    pub strict: bool,
    pub max_bytes: u64,
    pub simulated_delay_ms: u64,
    pub heuristic_delay_ms: u64,
    pub plausible_min_bytes: u64,
    pub plausible_max_bytes: u64,
    /// Probability threshold a random draw must exceed for ambiguous files
    pub acceptance_threshold: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub score_convention: ScoreConvention,
    pub shuffle: ShuffleStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreConvention {
    /// 75 + seed % 25
    #[default]
    Standard,
    /// 70 + seed % 30
    TableDriven,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleStrategy {
    /// Reproduces the historical swap index, which always resolves to 0
    #[default]
    Compatible,
    /// Seeded Fisher-Yates drawing the swap index from the LCG state
    Uniform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Text,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_bytes: MAX_BYTES,
            simulated_delay_ms: 1500,
            heuristic_delay_ms: 800,
            plausible_min_bytes: 50_000,
            plausible_max_bytes: 5_000_000,
            acceptance_threshold: 0.2,
        }
    }
}

impl UploadConfig {
    pub fn min_bytes(&self) -> u64 {
        if self.strict {
            STRICT_MIN_BYTES
        } else {
            DEFAULT_MIN_BYTES
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let config = Self::read(config_path)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("{:#}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    fn read(config_path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let upload = &self.upload;
        if upload.max_bytes < upload.min_bytes() {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "upload.max_bytes ({}) is below the minimum size ({})",
                upload.max_bytes,
                upload.min_bytes()
            )));
        }
        if !(0.0..=1.0).contains(&upload.acceptance_threshold) {
            return Err(ResumeAnalyzerError::Configuration(
                "upload.acceptance_threshold must be within 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }
}
