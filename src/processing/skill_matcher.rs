//! Filename keyword matching and skill detection

use crate::config::ShuffleStrategy;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::descriptor::UploadedFile;
use crate::processing::catalog::{skill_universe, SkillCategory, SKILL_CATEGORIES};
use crate::processing::seed::Seed;
use crate::processing::shuffle::sample;
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use serde::{Deserialize, Serialize};

pub const SHORT_KEYWORD_LEN: usize = 3;

fn is_whole_token(haystack: &[u8], start: usize, end: usize) -> bool {
    let boundary = |byte: Option<&u8>| byte.map_or(true, |b| !b.is_ascii_alphanumeric());
    boundary(start.checked_sub(1).and_then(|i| haystack.get(i))) && boundary(haystack.get(end))
}

/// Skills "found" for a file and the category that supplied the first block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDetection {
    pub primary_category: String,
    /// True when no keyword matched and the category came from the seed
    pub fallback: bool,
    pub skills: Vec<String>,
}

/// Matches lowercased filenames against every category keyword at once
pub struct SkillMatcher {
    keyword_matcher: AhoCorasick,
    /// Category index for each keyword pattern
    pattern_categories: Vec<usize>,
    categories: &'static [SkillCategory],
    strategy: ShuffleStrategy,
}

impl SkillMatcher {
    pub fn new(strategy: ShuffleStrategy) -> Result<Self> {
        Self::with_categories(SKILL_CATEGORIES, strategy)
    }

    pub fn with_categories(categories: &'static [SkillCategory], strategy: ShuffleStrategy) -> Result<Self> {
        if categories.is_empty() {
            return Err(ResumeAnalyzerError::Configuration(
                "skill matcher needs at least one category".to_string(),
            ));
        }

        let mut patterns = Vec::new();
        let mut pattern_categories = Vec::new();
        for (index, category) in categories.iter().enumerate() {
            for keyword in category.keywords {
                patterns.push(*keyword);
                pattern_categories.push(index);
            }
        }

        // Standard semantics so overlapping hits are all reported
        let keyword_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeAnalyzerError::AnalysisFailed(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            keyword_matcher,
            pattern_categories,
            categories,
            strategy,
        })
    }

    /// First category, in declaration order, with a keyword inside `file_name`.
    ///
    /// Keywords up to [`SHORT_KEYWORD_LEN`] bytes must stand as a whole token,
    /// so "ux" does not fire inside "linux".
    pub fn match_category(&self, file_name: &str) -> Option<usize> {
        let lowered = file_name.to_lowercase();
        let bytes = lowered.as_bytes();
        self.keyword_matcher
            .find_overlapping_iter(&lowered)
            .filter(|m| m.len() > SHORT_KEYWORD_LEN || is_whole_token(bytes, m.start(), m.end()))
            .map(|m| self.pattern_categories[m.pattern().as_usize()])
            .min()
    }

    pub fn detect_skills(&self, file: &UploadedFile, seed: Seed) -> SkillDetection {
        let category_count = self.categories.len() as u64;

        let (index, fallback, take) = match self.match_category(&file.name) {
            Some(index) => (index, false, 3 + seed.pick(3)),
            None => {
                let index = ((seed.as_u64() as u128 + file.byte_size as u128) % category_count as u128) as usize;
                (index, true, 3 + seed.pick(2))
            }
        };
        let category = &self.categories[index];

        let mut skills: Vec<String> = sample(category.skills, take as usize, seed, self.strategy)
            .into_iter()
            .map(str::to_string)
            .collect();

        let remaining: Vec<&str> = skill_universe()
            .into_iter()
            .map(|record| record.name)
            .filter(|name| !skills.iter().any(|s| s == name))
            .collect();
        let extra_count = 2 + seed.pick(2) as usize;
        skills.extend(sample(&remaining, extra_count, seed, self.strategy).into_iter().map(str::to_string));

        let mut unique: Vec<String> = Vec::with_capacity(skills.len());
        for skill in skills {
            if !unique.contains(&skill) {
                unique.push(skill);
            }
        }

        debug!(
            "Detected {} skills for '{}' (category: {}, fallback: {})",
            unique.len(),
            file.name,
            category.key,
            fallback
        );

        SkillDetection {
            primary_category: category.key.to_string(),
            fallback,
            skills: unique,
        }
    }

    pub fn categories(&self) -> &'static [SkillCategory] {
        self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(ShuffleStrategy::Compatible).unwrap()
    }

    #[test]
    fn test_security_keyword_selects_security() {
        let matcher = matcher();
        let file = UploadedFile::new("security_resume.pdf", 250_000, 1_700_000_000_000);
        let detection = matcher.detect_skills(&file, Seed::new(19));

        assert_eq!(detection.primary_category, "security");
        assert!(!detection.fallback);
        assert_eq!(
            detection.skills,
            vec!["Penetration Testing", "SIEM", "Incident Response", "Cryptography", "React", "CSS", "HTML"]
        );
    }

    #[test]
    fn test_earlier_category_wins() {
        let matcher = matcher();
        // "react" (frontend) precedes "security" in declaration order
        let index = matcher.match_category("React-Security-CV.pdf").unwrap();
        assert_eq!(matcher.categories()[index].key, "frontend");
    }

    #[test]
    fn test_short_keywords_need_token_boundaries() {
        let matcher = matcher();
        assert_eq!(matcher.match_category("linux_admin_cv.pdf"), None);
        assert_eq!(matcher.match_category("therapist_resume.pdf"), None);
        assert_eq!(matcher.match_category("capital_markets.pdf"), None);

        let key = |name: &str| matcher.match_category(name).map(|i| matcher.categories()[i].key);
        assert_eq!(key("ux_portfolio.pdf"), Some("design"));
        assert_eq!(key("Senior-API-engineer.pdf"), Some("backend"));
        assert_eq!(key("sre.pdf"), Some("devops"));
        // longer keywords still match as substrings
        assert_eq!(key("cloudnative_cv.pdf"), Some("devops"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = matcher();
        let index = matcher.match_category("CYBER_cv.PDF").unwrap();
        assert_eq!(matcher.categories()[index].key, "security");
    }

    #[test]
    fn test_fallback_uses_seed_and_size() {
        let matcher = matcher();
        let file = UploadedFile::new("resume_john.pdf", 120_000, 1_700_000_000_000);
        let detection = matcher.detect_skills(&file, Seed::new(15));

        // (15 + 120000) % 9 == 0
        assert!(detection.fallback);
        assert_eq!(detection.primary_category, "frontend");
        assert_eq!(
            detection.skills,
            vec!["React", "CSS", "HTML", "TypeScript", "Node.js", "Python", "SQL"]
        );
    }

    #[test]
    fn test_empty_name_degrades_gracefully() {
        let matcher = matcher();
        let detection = matcher.detect_skills(&UploadedFile::new("", 0, 0), Seed::new(0));
        assert!(detection.fallback);
        assert_eq!(detection.skills.len(), 5);
    }

    #[test]
    fn test_detected_skills_are_unique() {
        let matcher = matcher();
        for raw in 0..50 {
            let file = UploadedFile::new("data_analyst_cv.pdf", 60_000 + raw, 0);
            let detection = matcher.detect_skills(&file, Seed::new(raw));
            let mut seen = detection.skills.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), detection.skills.len());
        }
    }
}
