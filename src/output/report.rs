//! Export document: the report laid out in its fixed section order

use crate::processing::analyzer::{AnalysisReport, SkillLevel};
use crate::processing::career::CareerPath;
use crate::processing::catalog::CLOSING_RECOMMENDATIONS;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "AI RESUME ANALYSIS REPORT";

/// Sections every export renders, in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportSection {
    TitleBlock,
    OverallScore,
    Strengths,
    Improvements,
    Skills,
    CareerPaths,
    Closing,
}

pub const SECTION_ORDER: [ExportSection; 7] = [
    ExportSection::TitleBlock,
    ExportSection::OverallScore,
    ExportSection::Strengths,
    ExportSection::Improvements,
    ExportSection::Skills,
    ExportSection::CareerPaths,
    ExportSection::Closing,
];

impl ExportSection {
    pub fn heading(&self) -> &'static str {
        match self {
            ExportSection::TitleBlock => REPORT_TITLE,
            ExportSection::OverallScore => "OVERALL SCORE",
            ExportSection::Strengths => "STRENGTHS",
            ExportSection::Improvements => "AREAS FOR IMPROVEMENT",
            ExportSection::Skills => "SKILLS ANALYSIS",
            ExportSection::CareerPaths => "RECOMMENDED CAREER PATHS",
            ExportSection::Closing => "RECOMMENDATIONS",
        }
    }
}

/// Everything an export needs, detached from the live session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub generated_on: NaiveDate,
    pub file_name: String,
    pub resume_type: String,
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub skills: Vec<SkillLevel>,
    pub career_paths: Vec<CareerPath>,
    pub recommendations: Vec<String>,
    pub footer: Vec<String>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub analyzer_version: String,
    pub seed: u32,
    pub primary_category: String,
}

impl ExportDocument {
    pub fn new(report: &AnalysisReport, file_name: &str, generated_on: NaiveDate) -> Self {
        Self {
            generated_on,
            file_name: file_name.to_string(),
            resume_type: report.resume_type.clone(),
            overall_score: report.overall_score,
            strengths: report.strengths.clone(),
            improvements: report.improvements.clone(),
            skills: report.skills.clone(),
            career_paths: report.career_paths.clone(),
            recommendations: CLOSING_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            footer: vec![
                "This report was generated by AI Resume Analyzer.".to_string(),
                format!(
                    "Career recommendations are tailored to your {} background.",
                    report.resume_type
                ),
            ],
            metadata: ExportMetadata {
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                seed: report.seed.value(),
                primary_category: report.primary_category.clone(),
            },
        }
    }

    /// Dated today in local time
    pub fn today(report: &AnalysisReport, file_name: &str) -> Self {
        Self::new(report, file_name, chrono::Local::now().date_naive())
    }

    pub fn generated_on_label(&self) -> String {
        self.generated_on.format("%Y-%m-%d").to_string()
    }

    pub fn career_heading(&self) -> String {
        format!(
            "{} FOR {}",
            ExportSection::CareerPaths.heading(),
            self.resume_type.to_uppercase()
        )
    }
}

/// Kind of a line in the plain report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Subheading,
    Bullet,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    fn blank() -> Self {
        Self::new(LineKind::Blank, "")
    }
}

impl ExportDocument {
    /// Plain layout shared by the text and PDF exports
    pub fn lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        for section in SECTION_ORDER {
            self.push_section(section, &mut lines);
            lines.push(ReportLine::blank());
        }
        lines.extend(self.footer.iter().map(|line| ReportLine::new(LineKind::Body, line.as_str())));
        lines
    }

    fn push_section(&self, section: ExportSection, lines: &mut Vec<ReportLine>) {
        let bullets = |items: &[String], lines: &mut Vec<ReportLine>| {
            lines.extend(items.iter().map(|item| ReportLine::new(LineKind::Bullet, item.as_str())));
        };

        match section {
            ExportSection::TitleBlock => {
                lines.push(ReportLine::new(LineKind::Title, REPORT_TITLE));
                lines.push(ReportLine::new(LineKind::Body, format!("Generated on: {}", self.generated_on_label())));
                lines.push(ReportLine::new(LineKind::Body, format!("File: {}", self.file_name)));
                lines.push(ReportLine::new(LineKind::Body, format!("Resume Type: {}", self.resume_type)));
            }
            ExportSection::OverallScore => {
                lines.push(ReportLine::new(
                    LineKind::Heading,
                    format!("{}: {}%", section.heading(), self.overall_score),
                ));
            }
            ExportSection::Strengths => {
                lines.push(ReportLine::new(LineKind::Heading, format!("{}:", section.heading())));
                bullets(&self.strengths, lines);
            }
            ExportSection::Improvements => {
                lines.push(ReportLine::new(LineKind::Heading, format!("{}:", section.heading())));
                bullets(&self.improvements, lines);
            }
            ExportSection::Skills => {
                lines.push(ReportLine::new(LineKind::Heading, format!("{}:", section.heading())));
                for skill in &self.skills {
                    lines.push(ReportLine::new(LineKind::Bullet, format!("{}: {}%", skill.name, skill.level)));
                }
            }
            ExportSection::CareerPaths => {
                lines.push(ReportLine::new(LineKind::Heading, format!("{}:", self.career_heading())));
                for path in &self.career_paths {
                    lines.push(ReportLine::blank());
                    lines.push(ReportLine::new(
                        LineKind::Subheading,
                        format!("{} ({}% match)", path.title, path.match_score),
                    ));
                    lines.push(ReportLine::new(LineKind::Body, path.description.as_str()));
                    lines.push(ReportLine::new(
                        LineKind::Body,
                        format!("Required Skills: {}", path.requirements.join(", ")),
                    ));
                    lines.push(ReportLine::new(LineKind::Body, format!("Growth Outlook: {}", path.growth)));
                }
            }
            ExportSection::Closing => {
                lines.push(ReportLine::new(LineKind::Heading, format!("{}:", section.heading())));
                bullets(&self.recommendations, lines);
            }
        }
    }
}

/// Verdict badge shared by the console and HTML renderers
pub fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "EXCELLENT",
        80..=89 => "VERY GOOD",
        70..=79 => "GOOD",
        60..=69 => "FAIR",
        _ => "NEEDS WORK",
    }
}
