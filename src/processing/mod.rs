//! Deterministic analysis pipeline

pub mod analyzer;
pub mod career;
pub mod catalog;
pub mod seed;
pub mod shuffle;
pub mod skill_matcher;

pub use analyzer::{AnalysisEngine, AnalysisReport, SkillLevel};
pub use career::CareerPath;
pub use seed::{derive_seed, Seed};
