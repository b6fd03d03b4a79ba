//! Upload acceptance gate
//!
//! The content check is a placeholder for real document parsing: names that
//! look like a résumé pass outright, anything else needs a plausible size and a
//! lucky draw. That draw is the only non-deterministic step in the crate, so
//! it goes through [`Chance`] and tests can pin it.

use crate::config::UploadConfig;
use crate::error::RejectReason;
use crate::input::descriptor::UploadedFile;
use log::{debug, info};
use rand::Rng;
use std::time::Duration;

pub const RESUME_KEYWORDS: &[&str] = &["resume", "cv", "curriculum", "vitae", "profile"];

/// Source of uniform draws in `[0, 1)`
pub trait Chance: Send + Sync {
    fn draw(&self) -> f64;
}

/// Thread-local RNG, used outside tests
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadChance;

impl Chance for ThreadChance {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy)]
pub struct FixedChance(pub f64);

impl Chance for FixedChance {
    fn draw(&self) -> f64 {
        self.0
    }
}

pub struct AcceptanceGate {
    min_bytes: u64,
    max_bytes: u64,
    plausible_min_bytes: u64,
    plausible_max_bytes: u64,
    acceptance_threshold: f64,
    heuristic_delay: Duration,
    chance: Box<dyn Chance>,
}

impl AcceptanceGate {
    pub fn new(config: &UploadConfig) -> Self {
        Self::with_chance(config, Box::new(ThreadChance))
    }

    pub fn with_chance(config: &UploadConfig, chance: Box<dyn Chance>) -> Self {
        Self {
            min_bytes: config.min_bytes(),
            max_bytes: config.max_bytes,
            plausible_min_bytes: config.plausible_min_bytes,
            plausible_max_bytes: config.plausible_max_bytes,
            acceptance_threshold: config.acceptance_threshold,
            heuristic_delay: Duration::from_millis(config.heuristic_delay_ms),
            chance,
        }
    }

    /// Type and size checks; no delay, no randomness
    pub fn check_shape(&self, file: &UploadedFile) -> Result<(), RejectReason> {
        if !file.is_pdf_typed() {
            return Err(RejectReason::NotPdf);
        }
        if file.byte_size < self.min_bytes {
            return Err(RejectReason::TooSmall {
                size: file.byte_size,
                min: self.min_bytes,
            });
        }
        if file.byte_size > self.max_bytes {
            return Err(RejectReason::TooLarge {
                size: file.byte_size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }

    pub fn has_resume_keyword(file: &UploadedFile) -> bool {
        let name = file.lowercase_name();
        RESUME_KEYWORDS.iter().any(|keyword| name.contains(keyword))
    }

    /// Filename and size heuristic standing in for content inspection
    pub async fn looks_like_resume(&self, file: &UploadedFile) -> bool {
        tokio::time::sleep(self.heuristic_delay).await;

        if Self::has_resume_keyword(file) {
            return true;
        }

        let plausible_size = (self.plausible_min_bytes..=self.plausible_max_bytes).contains(&file.byte_size);
        if !plausible_size {
            debug!("'{}' has no resume keyword and an unusual size", file.name);
            return false;
        }

        let draw = self.chance.draw();
        debug!("'{}' admission draw {:.3} against {:.3}", file.name, draw, self.acceptance_threshold);
        draw > self.acceptance_threshold
    }

    pub async fn check(&self, file: &UploadedFile) -> Result<(), RejectReason> {
        self.check_shape(file)?;
        if !self.looks_like_resume(file).await {
            return Err(RejectReason::NotAResume);
        }
        info!("Accepted upload '{}' ({} bytes)", file.name, file.byte_size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(draw: f64) -> AcceptanceGate {
        AcceptanceGate::with_chance(&UploadConfig::default(), Box::new(FixedChance(draw)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_portfolio_rejected() {
        let file = UploadedFile::new("portfolio.pdf", 500, 1_700_000_000_000);
        let result = gate(0.99).check(&file).await;
        assert_eq!(result, Err(RejectReason::TooSmall { size: 500, min: 1024 }));
        assert_eq!(result.unwrap_err().code(), "size-too-small");
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_pdf_rejected() {
        let file = UploadedFile::new("resume.docx", 80_000, 0);
        assert_eq!(gate(0.99).check(&file).await, Err(RejectReason::NotPdf));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_rejected() {
        let file = UploadedFile::new("resume.pdf", 11 * 1024 * 1024, 0);
        assert!(matches!(gate(0.99).check(&file).await, Err(RejectReason::TooLarge { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_bypasses_draw() {
        // small but above minimum, and the draw would fail
        let file = UploadedFile::new("My_CV.pdf", 2_000, 0);
        assert_eq!(gate(0.0).check(&file).await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ambiguous_file_depends_on_draw() {
        let file = UploadedFile::new("document.pdf", 120_000, 0);
        assert_eq!(gate(0.5).check(&file).await, Ok(()));
        assert_eq!(gate(0.2).check(&file).await, Err(RejectReason::NotAResume));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ambiguous_file_outside_plausible_range() {
        let file = UploadedFile::new("document.pdf", 6_000_000, 0);
        assert_eq!(gate(0.99).check(&file).await, Err(RejectReason::NotAResume));
    }

    #[test]
    fn test_strict_minimum() {
        let config = UploadConfig {
            strict: true,
            ..UploadConfig::default()
        };
        let gate = AcceptanceGate::with_chance(&config, Box::new(FixedChance(1.0)));
        let file = UploadedFile::new("resume.pdf", 20_000, 0);
        assert_eq!(
            gate.check_shape(&file),
            Err(RejectReason::TooSmall { size: 20_000, min: 50_000 })
        );
    }

    #[test]
    fn test_thread_chance_range() {
        for _ in 0..100 {
            let draw = ThreadChance.draw();
            assert!((0.0..1.0).contains(&draw));
        }
    }
}
