//! Career match scoring and ranking

use crate::processing::catalog::{CareerPathTemplate, CAREER_PATHS};
use crate::processing::seed::Seed;
use serde::{Deserialize, Serialize};

pub const BASE_SCORE: i64 = 40;
pub const REQUIRED_SKILL_POINTS: i64 = 15;
pub const OPTIONAL_SKILL_POINTS: i64 = 8;
pub const MIN_MATCH: i64 = 45;
pub const MAX_MATCH: i64 = 98;
pub const TOP_CAREERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    #[serde(rename = "match")]
    pub match_score: u8,
    pub description: String,
    pub requirements: Vec<String>,
    pub growth: String,
}

/// Exact name, or a case-insensitive substring in either direction
fn skill_matches(detected: &str, wanted: &str) -> bool {
    if detected == wanted {
        return true;
    }
    let detected = detected.to_lowercase();
    let wanted = wanted.to_lowercase();
    detected.contains(&wanted) || wanted.contains(&detected)
}

fn covered(detected: &[String], wanted: &str) -> bool {
    detected.iter().any(|skill| skill_matches(skill, wanted))
}

/// Match percentage for one template, clamped to `[45, 98]`.
///
/// Jitter uses the seed offset by the title's length so templates scored with
/// the same seed still diverge.
pub fn score_career(detected: &[String], template: &CareerPathTemplate, seed: Seed) -> u8 {
    let mut score = BASE_SCORE;

    score += template
        .required_skills
        .iter()
        .filter(|skill| covered(detected, skill))
        .count() as i64
        * REQUIRED_SKILL_POINTS;

    score += template
        .optional_skills
        .iter()
        .filter(|skill| covered(detected, skill))
        .count() as i64
        * OPTIONAL_SKILL_POINTS;

    score += detected
        .iter()
        .filter_map(|skill| template.bonuses.get(skill))
        .map(i64::from)
        .sum::<i64>();

    let perturbed = seed.offset(template.title.chars().count() as u64);
    score += (perturbed % 10) as i64 - 5;

    score.clamp(MIN_MATCH, MAX_MATCH) as u8
}

/// Scores every template, keeping the best three in declaration order on ties
pub fn rank_careers(detected: &[String], seed: Seed) -> Vec<CareerPath> {
    rank_templates(detected, CAREER_PATHS, seed)
}

pub fn rank_templates(detected: &[String], templates: &[CareerPathTemplate], seed: Seed) -> Vec<CareerPath> {
    let mut scored: Vec<(u8, &CareerPathTemplate)> = templates
        .iter()
        .map(|template| (score_career(detected, template, seed), template))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(TOP_CAREERS)
        .map(|(match_score, template)| CareerPath {
            title: template.title.to_string(),
            match_score,
            description: template.description.to_string(),
            requirements: template.required_skills.iter().map(|s| s.to_string()).collect(),
            growth: template.growth.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::SkillBonuses;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    static PLAIN: CareerPathTemplate = CareerPathTemplate {
        title: "Tester",
        required_skills: &["Testing", "Automation"],
        optional_skills: &["Python"],
        description: "",
        growth: "",
        bonuses: SkillBonuses::new(&[("Selenium", 7)]),
    };

    #[test]
    fn test_score_components() {
        // title length 6 -> jitter (seed + 6) % 10 - 5
        let seed = Seed::new(9); // jitter 0
        assert_eq!(score_career(&skills(&[]), &PLAIN, seed), 45);
        assert_eq!(score_career(&skills(&["Testing"]), &PLAIN, seed), 55);
        assert_eq!(score_career(&skills(&["Testing", "Automation", "Python"]), &PLAIN, seed), 78);
        assert_eq!(score_career(&skills(&["Testing", "Selenium"]), &PLAIN, seed), 62);
    }

    #[test]
    fn test_substring_match_either_direction() {
        let seed = Seed::new(9);
        // "Automation" contains "auto"; "python" is inside "Python 3"
        assert_eq!(score_career(&skills(&["auto", "Python 3"]), &PLAIN, seed), 63);
    }

    #[test]
    fn test_scores_are_clamped() {
        let all = skills(&["Testing", "Automation", "Python", "Selenium"]);
        for raw in 0..1000 {
            let score = score_career(&all, &PLAIN, Seed::new(raw));
            assert!((45..=98).contains(&score));
        }
        assert_eq!(score_career(&skills(&[]), &PLAIN, Seed::new(0)), 45);
    }

    #[test]
    fn test_ranking_for_frontend_profile() {
        let detected = skills(&["React", "CSS", "HTML", "TypeScript", "Node.js", "Python", "SQL"]);
        let ranked = rank_careers(&detected, Seed::new(15));

        let titles: Vec<_> = ranked.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Frontend Developer", "Full Stack Developer", "Backend Engineer"]);
        let matches: Vec<_> = ranked.iter().map(|p| p.match_score).collect();
        assert_eq!(matches, vec![89, 82, 77]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let ranked = rank_careers(&[], Seed::new(0));
        assert_eq!(ranked.len(), 3);
        for pair in ranked.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        // Nothing detected: every template sits on the floor, so declaration order decides
        let titles: Vec<_> = ranked.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Frontend Developer", "Full Stack Developer", "Backend Engineer"]);
    }
}
