//! Analysis engine: turns file metadata into a complete report

use crate::config::{AnalysisConfig, ScoreConvention, ShuffleStrategy};
use crate::error::Result;
use crate::input::descriptor::UploadedFile;
use crate::processing::career::{rank_careers, CareerPath};
use crate::processing::catalog::{
    strength_phrase, SkillCategory, DEFAULT_RESUME_TYPE, GENERAL_IMPROVEMENTS, GENERIC_STRENGTHS,
};
use crate::processing::seed::{derive_seed, Seed};
use crate::processing::shuffle::sample;
use crate::processing::skill_matcher::SkillMatcher;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const MAX_SKILL_LEVEL: u8 = 95;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub name: String,
    pub level: u8,
}

/// Synthesised report for one uploaded file. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Overall score (0-100)
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub skills: Vec<SkillLevel>,
    /// Best matches first, at most three
    pub career_paths: Vec<CareerPath>,
    pub resume_type: String,

    pub seed: Seed,
    pub primary_category: String,
}

/// Coordinates seed derivation, skill detection, sampling and career scoring
pub struct AnalysisEngine {
    skill_matcher: SkillMatcher,
    score_convention: ScoreConvention,
    strategy: ShuffleStrategy,
}

impl AnalysisEngine {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            skill_matcher: SkillMatcher::new(config.shuffle)?,
            score_convention: config.score_convention,
            strategy: config.shuffle,
        })
    }

    /// Build the report for `file`. Only name, size and modification time are read.
    pub fn build_report(&self, file: &UploadedFile) -> AnalysisReport {
        let seed = derive_seed(file);
        info!("Analyzing '{}' with seed {}", file.name, seed);

        let overall_score = self.overall_score(seed);
        let detection = self.skill_matcher.detect_skills(file, seed);
        let resume_type = self.resume_type(&detection.skills);
        let strengths = self.select_strengths(&detection.skills, seed);
        let improvements = self.select_improvements(seed);
        let skills = skill_levels(&detection.skills, seed);
        let career_paths = rank_careers(&detection.skills, seed);

        debug!(
            "Report for '{}': type={}, score={}, top career={:?}",
            file.name,
            resume_type,
            overall_score,
            career_paths.first().map(|p| p.title.as_str())
        );

        AnalysisReport {
            overall_score,
            strengths,
            improvements,
            skills,
            career_paths,
            resume_type,
            seed,
            primary_category: detection.primary_category,
        }
    }

    fn overall_score(&self, seed: Seed) -> u8 {
        let score = match self.score_convention {
            ScoreConvention::Standard => 75 + seed.pick(25),
            ScoreConvention::TableDriven => 70 + seed.pick(30),
        };
        score as u8
    }

    /// Label of the category declaring the most detected skills
    pub fn resume_type(&self, detected: &[String]) -> String {
        resume_type_for(self.skill_matcher.categories(), detected)
    }

    fn select_strengths(&self, detected: &[String], seed: Seed) -> Vec<String> {
        let mut pool: Vec<String> = Vec::new();
        let phrases = detected
            .iter()
            .map(|skill| strength_phrase(skill))
            .chain(GENERIC_STRENGTHS.iter().map(|s| s.to_string()));
        for phrase in phrases {
            if !pool.contains(&phrase) {
                pool.push(phrase);
            }
        }

        let count = 3 + seed.pick(4) as usize;
        sample(&pool, count, seed, self.strategy)
    }

    fn select_improvements(&self, seed: Seed) -> Vec<String> {
        let count = 3 + seed.pick(3) as usize;
        sample(GENERAL_IMPROVEMENTS, count, seed, self.strategy)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

pub fn resume_type_for(categories: &[SkillCategory], detected: &[String]) -> String {
    let mut best: Option<(&SkillCategory, usize)> = None;
    for category in categories {
        let overlap = detected.iter().filter(|skill| category.declares(skill)).count();
        // strictly greater keeps the first-declared category on ties
        if overlap > 0 && best.map_or(true, |(_, count)| overlap > count) {
            best = Some((category, overlap));
        }
    }
    best.map(|(category, _)| category.label.to_string())
        .unwrap_or_else(|| DEFAULT_RESUME_TYPE.to_string())
}

/// First five or six detected skills with a level in `[60, 95]`
pub fn skill_levels(detected: &[String], seed: Seed) -> Vec<SkillLevel> {
    let count = 5 + seed.pick(2) as usize;
    detected
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, name)| {
            let level = 60 + (seed.as_u64() + index as u64 * 7) % 35;
            SkillLevel {
                name: name.clone(),
                level: level.min(MAX_SKILL_LEVEL as u64) as u8,
            }
        })
        .collect()
}
