//! Static reference tables: skill categories, career templates, phrase pools

use serde::Serialize;

/// A skill family with the filename keywords that select it.
///
/// Declaration order matters: the first category whose keyword appears in a
/// filename wins, and résumé-type ties go to the earlier entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub skills: &'static [&'static str],
}

impl SkillCategory {
    pub fn declares(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| *s == skill)
    }
}

/// A skill with the category it is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRecord {
    pub name: &'static str,
    pub detection_category: &'static str,
}

/// Extra points a career grants for specific detected skills
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillBonuses(&'static [(&'static str, i32)]);

impl SkillBonuses {
    pub const fn new(entries: &'static [(&'static str, i32)]) -> Self {
        SkillBonuses(entries)
    }

    pub fn get(&self, skill: &str) -> Option<i32> {
        self.0.iter().find(|(name, _)| *name == skill).map(|(_, bonus)| *bonus)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CareerPathTemplate {
    pub title: &'static str,
    pub required_skills: &'static [&'static str],
    pub optional_skills: &'static [&'static str],
    pub description: &'static str,
    pub growth: &'static str,
    pub bonuses: SkillBonuses,
}

pub const DEFAULT_RESUME_TYPE: &str = "Professional";

pub static SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        key: "frontend",
        label: "Frontend Developer",
        keywords: &["frontend", "front-end", "react", "javascript", "web"],
        skills: &["JavaScript", "React", "CSS", "HTML", "TypeScript"],
    },
    SkillCategory {
        key: "backend",
        label: "Backend Developer",
        keywords: &["backend", "back-end", "api", "server", "java"],
        skills: &["Node.js", "Python", "SQL", "Java", "REST APIs", "Docker"],
    },
    SkillCategory {
        key: "data",
        label: "Data Scientist",
        keywords: &["data", "analyst", "scientist", "analytics", "machine"],
        skills: &["Python", "Machine Learning", "Data Analysis", "SQL", "Statistics", "Pandas"],
    },
    SkillCategory {
        key: "devops",
        label: "DevOps Engineer",
        keywords: &["devops", "cloud", "sre", "infra", "kubernetes"],
        skills: &["Docker", "Kubernetes", "AWS", "Terraform", "CI/CD", "Linux"],
    },
    SkillCategory {
        key: "security",
        label: "Security Engineer",
        keywords: &["security", "cyber", "infosec", "pentest"],
        skills: &[
            "Network Security",
            "Penetration Testing",
            "SIEM",
            "Incident Response",
            "Cryptography",
            "Linux",
        ],
    },
    SkillCategory {
        key: "design",
        label: "Designer",
        keywords: &["design", "ux", "figma", "creative"],
        skills: &["UI/UX Design", "Figma", "Prototyping", "User Research", "Visual Design"],
    },
    SkillCategory {
        key: "product",
        label: "Product Manager",
        keywords: &["product", "roadmap", "owner"],
        skills: &[
            "Product Strategy",
            "Agile",
            "User Research",
            "Roadmapping",
            "Stakeholder Management",
            "Analytics",
        ],
    },
    SkillCategory {
        key: "marketing",
        label: "Marketing Professional",
        keywords: &["marketing", "seo", "brand", "growth"],
        skills: &["Digital Marketing", "SEO", "Content Strategy", "Analytics", "Social Media"],
    },
    SkillCategory {
        key: "sales",
        label: "Sales Professional",
        keywords: &["sales", "account", "business"],
        skills: &["Sales Strategy", "CRM", "Negotiation", "Lead Generation", "Communication"],
    },
];

pub static CAREER_PATHS: &[CareerPathTemplate] = &[
    CareerPathTemplate {
        title: "Senior Frontend Developer",
        required_skills: &["JavaScript", "React", "TypeScript"],
        optional_skills: &["CSS", "HTML", "Testing"],
        description: "Build rich, accessible interfaces with modern frontend tooling",
        growth: "High demand, $95k-$130k",
        bonuses: SkillBonuses::new(&[("React", 5), ("TypeScript", 3)]),
    },
    CareerPathTemplate {
        title: "Full Stack Developer",
        required_skills: &["JavaScript", "Node.js", "SQL"],
        optional_skills: &["React", "Docker", "REST APIs"],
        description: "Leverage both frontend and backend skills",
        growth: "Excellent growth, $85k-$120k",
        bonuses: SkillBonuses::new(&[("Node.js", 4)]),
    },
    CareerPathTemplate {
        title: "Backend Engineer",
        required_skills: &["Python", "SQL", "REST APIs"],
        optional_skills: &["Java", "Docker", "Node.js"],
        description: "Design services, data models and APIs that scale",
        growth: "Strong demand, $90k-$135k",
        bonuses: SkillBonuses::new(&[("Java", 3), ("Python", 3)]),
    },
    CareerPathTemplate {
        title: "Machine Learning Engineer",
        required_skills: &["Python", "Machine Learning", "Statistics"],
        optional_skills: &["Pandas", "Data Analysis", "AWS"],
        description: "Deploy ML models in production",
        growth: "Emerging field, $120k-$170k",
        bonuses: SkillBonuses::new(&[("Machine Learning", 6)]),
    },
    CareerPathTemplate {
        title: "DevOps Engineer",
        required_skills: &["Docker", "Kubernetes", "CI/CD"],
        optional_skills: &["AWS", "Terraform", "Linux"],
        description: "Automate delivery pipelines and run reliable infrastructure",
        growth: "Infrastructure track, $100k-$150k",
        bonuses: SkillBonuses::new(&[("Kubernetes", 5)]),
    },
    CareerPathTemplate {
        title: "Security Analyst",
        required_skills: &["Network Security", "Incident Response", "SIEM"],
        optional_skills: &["Penetration Testing", "Cryptography", "Linux"],
        description: "Detect, investigate and contain threats across the organisation",
        growth: "Critical shortage, $95k-$145k",
        bonuses: SkillBonuses::new(&[("Penetration Testing", 5)]),
    },
    CareerPathTemplate {
        title: "Senior UX Designer",
        required_skills: &["UI/UX Design", "Figma", "User Research"],
        optional_skills: &["Prototyping", "Visual Design", "CSS"],
        description: "Lead user experience design initiatives",
        growth: "Creative field, $85k-$130k",
        bonuses: SkillBonuses::new(&[("Figma", 4)]),
    },
    CareerPathTemplate {
        title: "Product Manager",
        required_skills: &["Product Strategy", "Agile", "Stakeholder Management"],
        optional_skills: &["User Research", "Roadmapping", "Analytics", "Communication"],
        description: "Lead product vision and roadmap",
        growth: "Leadership track, $110k-$160k",
        bonuses: SkillBonuses::new(&[("Product Strategy", 5)]),
    },
    CareerPathTemplate {
        title: "Digital Marketing Manager",
        required_skills: &["Digital Marketing", "SEO", "Content Strategy"],
        optional_skills: &["Analytics", "Social Media"],
        description: "Lead comprehensive digital marketing strategies",
        growth: "Growing field, $70k-$110k",
        bonuses: SkillBonuses::new(&[("SEO", 3)]),
    },
    CareerPathTemplate {
        title: "Sales Manager",
        required_skills: &["Sales Strategy", "CRM", "Negotiation"],
        optional_skills: &["Lead Generation", "Communication"],
        description: "Lead sales team and drive revenue",
        growth: "Management track, $80k-$140k",
        bonuses: SkillBonuses::new(&[("Negotiation", 4)]),
    },
];

static STRENGTH_PHRASES: &[(&str, &str)] = &[
    ("JavaScript", "Strong JavaScript fundamentals"),
    ("React", "Modern component-based UI development"),
    ("TypeScript", "Type-safe application design"),
    ("Python", "Versatile Python programming"),
    ("SQL", "Solid database querying skills"),
    ("Machine Learning", "Statistical modeling and ML expertise"),
    ("Data Analysis", "Data analysis expertise"),
    ("Docker", "Containerized deployment experience"),
    ("Kubernetes", "Container orchestration at scale"),
    ("AWS", "Cloud infrastructure knowledge"),
    ("Network Security", "Security-first mindset"),
    ("Penetration Testing", "Offensive security experience"),
    ("Incident Response", "Calm incident handling"),
    ("Figma", "Polished visual design work"),
    ("User Research", "User-focused approach"),
    ("UI/UX Design", "Design thinking"),
    ("Product Strategy", "Strategic thinking"),
    ("Agile", "Cross-functional collaboration"),
    ("Stakeholder Management", "Stakeholder alignment"),
    ("Digital Marketing", "Campaign optimization"),
    ("SEO", "Search visibility know-how"),
    ("Content Strategy", "Creative content planning"),
    ("Sales Strategy", "Target achievement"),
    ("Negotiation", "Persuasion skills"),
    ("CRM", "Pipeline discipline"),
    ("Communication", "Clear communication"),
    ("Lead Generation", "Relationship building"),
];

pub static GENERIC_STRENGTHS: &[&str] = &[
    "Clear formatting",
    "Relevant experience",
    "Quantified achievements",
    "Problem-solving abilities",
    "Consistent career progression",
];

pub static GENERAL_IMPROVEMENTS: &[&str] = &[
    "Add more quantifiable metrics",
    "Include relevant certifications",
    "Enhance project descriptions",
    "Add portfolio links",
    "Include volunteer experience",
    "Expand on leadership roles",
    "Add language proficiencies",
    "Include professional references",
    "Improve formatting consistency",
    "Add skills section",
];

pub static CLOSING_RECOMMENDATIONS: &[&str] = &[
    "Tailor your resume to each application by mirroring the role's key skills",
    "Lead every experience bullet with a measurable outcome",
    "Keep the layout to one or two pages with consistent formatting",
    "Refresh your skills section as you complete new projects or certifications",
];

/// Phrase describing a detected skill as a strength
pub fn strength_phrase(skill: &str) -> String {
    STRENGTH_PHRASES
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, phrase)| phrase.to_string())
        .unwrap_or_else(|| format!("Hands-on experience with {}", skill))
}

/// Every distinct skill, attributed to the first category declaring it
pub fn skill_universe() -> Vec<SkillRecord> {
    let mut records: Vec<SkillRecord> = Vec::new();
    for category in SKILL_CATEGORIES {
        for skill in category.skills {
            if !records.iter().any(|r| r.name == *skill) {
                records.push(SkillRecord {
                    name: *skill,
                    detection_category: category.key,
                });
            }
        }
    }
    records
}

pub fn category_by_key(key: &str) -> Option<&'static SkillCategory> {
    SKILL_CATEGORIES.iter().find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_universe_is_deduplicated() {
        let universe = skill_universe();
        let names: HashSet<_> = universe.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), universe.len());

        let python = universe.iter().find(|r| r.name == "Python").unwrap();
        assert_eq!(python.detection_category, "backend");
    }

    #[test]
    fn test_categories_have_enough_skills() {
        for category in SKILL_CATEGORIES {
            // detection can ask for up to 5 skills from a matched category
            assert!(category.skills.len() >= 5, "{} is too small", category.key);
            assert!(!category.keywords.is_empty());
        }
    }

    #[test]
    fn test_pools_are_unique() {
        let improvements: HashSet<_> = GENERAL_IMPROVEMENTS.iter().collect();
        assert_eq!(improvements.len(), GENERAL_IMPROVEMENTS.len());
        let generic: HashSet<_> = GENERIC_STRENGTHS.iter().collect();
        assert_eq!(generic.len(), GENERIC_STRENGTHS.len());
    }

    #[test]
    fn test_bonus_lookup() {
        let frontend = &CAREER_PATHS[0];
        assert_eq!(frontend.bonuses.get("React"), Some(5));
        assert_eq!(frontend.bonuses.get("Rust"), None);
    }

    #[test]
    fn test_strength_phrase_fallback() {
        assert_eq!(strength_phrase("React"), "Modern component-based UI development");
        assert_eq!(strength_phrase("CSS"), "Hands-on experience with CSS");
    }
}
