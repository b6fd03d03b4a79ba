//! Output formatters for the analysis export

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::pdf::PdfFormatter;
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Renders an export document into a textual format
pub trait OutputFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal rendering
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// The plain-text report as offered for download
pub struct TextFormatter;

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    text_formatter: TextFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .skill-bar { background: #e9ecef; border-radius: 4px; height: 8px; margin: 4px 0 12px; }
        .skill-fill { background: #007acc; border-radius: 4px; height: 8px; }
        .career { background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .strengths { border-left: 4px solid #28a745; padding-left: 15px; }
        .improvements { border-left: 4px solid #ffc107; padding-left: 15px; }
        .footer { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ title }}</h1>
            <p>Generated on: {{ generated_on }} | File: {{ doc.file_name }} | Resume Type: {{ doc.resume_type }}</p>
        </div>

        <div class="section">
            <h2>Overall Score: {{ doc.overall_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
        </div>

        <div class="section">
            <h2>Strengths</h2>
            <ul class="strengths">
            {% for strength in doc.strengths %}
                <li>{{ strength }}</li>
            {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Areas for Improvement</h2>
            <ul class="improvements">
            {% for improvement in doc.improvements %}
                <li>{{ improvement }}</li>
            {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Skills Analysis</h2>
            {% for skill in doc.skills %}
            <div>{{ skill.name }}: {{ skill.level }}%</div>
            <div class="skill-bar"><div class="skill-fill" style="width: {{ skill.level }}%"></div></div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Recommended Career Paths for {{ doc.resume_type }}</h2>
            {% for path in doc.career_paths %}
            <div class="career">
                <h3>{{ path.title }} ({{ path.match_score }}% match)</h3>
                <p>{{ path.description }}</p>
                <p><strong>Required Skills:</strong> {{ path.requirements.join(", ") }}</p>
                <p><strong>Growth Outlook:</strong> {{ path.growth }}</p>
            </div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Recommendations</h2>
            <ul>
            {% for recommendation in doc.recommendations %}
                <li>{{ recommendation }}</li>
            {% endfor %}
            </ul>
        </div>

        <div class="footer">
            {% for line in doc.footer %}
            <p>{{ line }}</p>
            {% endfor %}
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    doc: &'a ExportDocument,
    include_styles: bool,
    title: &'static str,
    generated_on: String,
    score_class: &'static str,
    score_label: &'static str,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let badge = score_label(score);
        let color = match score {
            90..=100 => Color::Green,
            80..=89 => Color::BrightGreen,
            70..=79 => Color::Yellow,
            60..=69 => Color::BrightYellow,
            _ => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_level_bar(level: u8) -> String {
        let filled = (level as usize) / 5;
        format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled.min(20)))
    }

    fn format_section(&self, section: ExportSection, doc: &ExportDocument, output: &mut String) {
        match section {
            ExportSection::TitleBlock => {
                output.push_str(&self.format_header(REPORT_TITLE, 1));
                output.push_str(&format!(
                    "Generated on: {} | File: {} | Resume Type: {}\n",
                    doc.generated_on_label(),
                    doc.file_name,
                    self.colorize(&doc.resume_type, Color::Cyan)
                ));
            }
            ExportSection::OverallScore => {
                output.push_str(&self.format_header("Overall Score", 2));
                output.push_str(&format!(
                    "{}% {}\n",
                    doc.overall_score,
                    self.format_score_badge(doc.overall_score)
                ));
            }
            ExportSection::Strengths => {
                output.push_str(&self.format_header("Strengths", 2));
                for strength in &doc.strengths {
                    output.push_str(&format!("  {} {}\n", self.colorize("+", Color::Green), strength));
                }
            }
            ExportSection::Improvements => {
                output.push_str(&self.format_header("Areas for Improvement", 2));
                for improvement in &doc.improvements {
                    output.push_str(&format!("  {} {}\n", self.colorize("-", Color::Yellow), improvement));
                }
            }
            ExportSection::Skills => {
                output.push_str(&self.format_header("Skills Analysis", 2));
                for skill in &doc.skills {
                    output.push_str(&format!(
                        "  {:<24} {} {}%\n",
                        skill.name,
                        self.colorize(&Self::format_level_bar(skill.level), Color::Blue),
                        skill.level
                    ));
                }
            }
            ExportSection::CareerPaths => {
                output.push_str(&self.format_header(&format!("Career Paths for {}", doc.resume_type), 2));
                for (index, path) in doc.career_paths.iter().enumerate() {
                    output.push_str(&format!(
                        "{}. {} ({}% match)\n",
                        index + 1,
                        self.colorize(&path.title, Color::Cyan),
                        path.match_score
                    ));
                    output.push_str(&format!("   {}\n", path.description));
                    if self.detailed {
                        output.push_str(&format!("   Required Skills: {}\n", path.requirements.join(", ")));
                    }
                    output.push_str(&format!("   Growth Outlook: {}\n", path.growth));
                }
            }
            ExportSection::Closing => {
                output.push_str(&self.format_header("Recommendations", 3));
                for recommendation in &doc.recommendations {
                    output.push_str(&format!("  • {}\n", recommendation));
                }
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String> {
        let mut output = String::new();
        for section in SECTION_ORDER {
            self.format_section(section, doc, &mut output);
        }

        output.push('\n');
        for line in &doc.footer {
            output.push_str(&self.colorize(line, Color::BrightBlack));
            output.push('\n');
        }

        if self.detailed {
            output.push_str(&format!(
                "\nSeed: {} | Primary category: {} | Analyzer v{}\n",
                doc.metadata.seed, doc.metadata.primary_category, doc.metadata.analyzer_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String> {
        let mut content = String::new();
        for line in doc.lines() {
            match line.kind {
                LineKind::Bullet => content.push_str(&format!("• {}", line.text)),
                _ => content.push_str(&line.text),
            }
            content.push('\n');
        }
        Ok(content)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(doc)?)
        } else {
            Ok(serde_json::to_string(doc)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn score_class(score: u8) -> &'static str {
        match score {
            90..=100 => "score-excellent",
            70..=89 => "score-good",
            60..=69 => "score-fair",
            _ => "score-poor",
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String> {
        let template = HtmlTemplate {
            doc,
            include_styles: self.include_styles,
            title: REPORT_TITLE,
            generated_on: doc.generated_on_label(),
            score_class: Self::score_class(doc.overall_score),
            score_label: score_label(doc.overall_score),
        };
        template
            .render()
            .map_err(|e| ResumeAnalyzerError::ExportGeneration(format!("HTML template failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn bullet_list(items: &[String]) -> String {
        let mut list = String::new();
        for item in items {
            list.push_str(&format!("- {}\n", item));
        }
        list
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, doc: &ExportDocument) -> Result<String> {
        let mut content = String::new();

        for section in SECTION_ORDER {
            match section {
                ExportSection::TitleBlock => {
                    content.push_str("# AI Resume Analysis Report\n\n");
                    content.push_str(&format!("**Generated on:** {}  \n", doc.generated_on_label()));
                    content.push_str(&format!("**File:** {}  \n", doc.file_name));
                    content.push_str(&format!("**Resume Type:** {}\n\n", doc.resume_type));
                }
                ExportSection::OverallScore => {
                    content.push_str(&format!(
                        "## Overall Score: {}% ({})\n\n",
                        doc.overall_score,
                        score_label(doc.overall_score)
                    ));
                }
                ExportSection::Strengths => {
                    content.push_str("## Strengths\n\n");
                    content.push_str(&Self::bullet_list(&doc.strengths));
                    content.push('\n');
                }
                ExportSection::Improvements => {
                    content.push_str("## Areas for Improvement\n\n");
                    content.push_str(&Self::bullet_list(&doc.improvements));
                    content.push('\n');
                }
                ExportSection::Skills => {
                    content.push_str("## Skills Analysis\n\n| Skill | Level |\n|-------|-------|\n");
                    for skill in &doc.skills {
                        content.push_str(&format!("| {} | {}% |\n", skill.name, skill.level));
                    }
                    content.push('\n');
                }
                ExportSection::CareerPaths => {
                    content.push_str(&format!("## Recommended Career Paths for {}\n\n", doc.resume_type));
                    for path in &doc.career_paths {
                        content.push_str(&format!("### {} ({}% match)\n\n", path.title, path.match_score));
                        content.push_str(&format!("{}\n\n", path.description));
                        content.push_str(&format!("**Required Skills:** {}  \n", path.requirements.join(", ")));
                        content.push_str(&format!("**Growth Outlook:** {}\n\n", path.growth));
                    }
                }
                ExportSection::Closing => {
                    content.push_str("## Recommendations\n\n");
                    content.push_str(&Self::bullet_list(&doc.recommendations));
                    content.push('\n');
                }
            }
        }

        content.push_str("---\n\n");
        for line in &doc.footer {
            content.push_str(&format!("*{}*  \n", line));
        }

        if self.include_metadata {
            content.push_str(&format!(
                "\n<!-- seed: {}, primary category: {}, analyzer v{} -->\n",
                doc.metadata.seed, doc.metadata.primary_category, doc.metadata.analyzer_version
            ));
        }

        Ok(content)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            text_formatter: TextFormatter,
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
            pdf_formatter: PdfFormatter::new(),
        }
    }

    /// Render `doc` as text. PDF has no textual form.
    pub fn generate_report(&self, doc: &ExportDocument, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Text => &self.text_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
            OutputFormat::Pdf => {
                return Err(ResumeAnalyzerError::ExportGeneration(
                    "PDF output is binary and must be saved to a file".to_string(),
                ))
            }
        };
        formatter.format_report(doc)
    }

    /// Render `doc` into the bytes written for an export
    pub fn generate(&self, doc: &ExportDocument, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Pdf => self.pdf_formatter.render(doc),
            other => self.generate_report(doc, other).map(String::into_bytes),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to `file_path` through a temp file in the same directory,
/// so a failed export never leaves a partial file behind.
pub fn save_export(content: &[u8], file_path: &Path) -> Result<()> {
    let export_error = |e: std::io::Error| {
        ResumeAnalyzerError::ExportGeneration(format!("Failed to write {}: {}", file_path.display(), e))
    };

    let parent = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(export_error)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(export_error)?;
    temp.write_all(content).map_err(export_error)?;
    temp.flush().map_err(export_error)?;
    temp.persist(file_path).map_err(|e| export_error(e.error))?;

    log::info!("Export saved to {}", file_path.display());
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_name: &str) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    let extension = match format {
        OutputFormat::Console | OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };
    format!("{}_analysis.{}", base_name, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::input::descriptor::UploadedFile;
    use crate::processing::analyzer::AnalysisEngine;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn document(name: &str) -> ExportDocument {
        let engine = AnalysisEngine::new(&AnalysisConfig::default()).unwrap();
        let report = engine.build_report(&UploadedFile::new(name, 120_000, 1_700_000_000_000));
        ExportDocument::new(&report, name, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn assert_in_order(content: &str, markers: &[&str]) {
        let mut cursor = 0;
        for marker in markers {
            let found = content[cursor..]
                .find(marker)
                .unwrap_or_else(|| panic!("'{}' missing or out of order", marker));
            cursor += found + marker.len();
        }
    }

    #[test]
    fn test_text_export_layout() {
        let text = TextFormatter.format_report(&document("resume_john.pdf")).unwrap();

        assert!(text.starts_with("AI RESUME ANALYSIS REPORT\nGenerated on: 2024-03-01\nFile: resume_john.pdf\n"));
        assert!(text.contains("OVERALL SCORE: 90%"));
        assert!(text.contains("• Hands-on experience with CSS"));
        assert!(text.contains("Senior Frontend Developer (89% match)"));
        assert_in_order(
            &text,
            &[
                "Resume Type: Frontend Developer",
                "OVERALL SCORE",
                "STRENGTHS:",
                "AREAS FOR IMPROVEMENT:",
                "SKILLS ANALYSIS:",
                "RECOMMENDED CAREER PATHS FOR FRONTEND DEVELOPER:",
                "RECOMMENDATIONS:",
                "This report was generated by AI Resume Analyzer.",
            ],
        );
    }

    #[test]
    fn test_markdown_and_console_order() {
        let doc = document("resume_john.pdf");

        let markdown = MarkdownFormatter::new(false).format_report(&doc).unwrap();
        assert_in_order(
            &markdown,
            &["# AI Resume Analysis Report", "## Overall Score: 90%", "## Strengths", "## Areas for Improvement",
              "## Skills Analysis", "## Recommended Career Paths", "## Recommendations"],
        );
        assert!(!markdown.contains("seed:"));

        let console = ConsoleFormatter::new(false, true).format_report(&doc).unwrap();
        assert_in_order(&console, &["Overall Score", "Strengths", "Skills Analysis", "Career Paths", "Recommendations"]);
        assert!(console.contains("90% [EXCELLENT]"));
        assert!(console.contains("Seed: 15"));
    }

    #[test]
    fn test_html_escapes_file_name() {
        let doc = document("<script>alert(1)</script>.pdf");
        let html = HtmlFormatter::new(false).format_report(&doc).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<style>"));
        assert_in_order(&html, &["Overall Score", "Strengths", "Skills Analysis", "Recommended Career Paths", "Recommendations"]);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = document("resume_john.pdf");
        let json = JsonFormatter::new(false).format_report(&doc).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
        assert!(json.contains("\"match\":89"));
    }

    #[test]
    fn test_pdf_requires_binary_path() {
        let generator = ReportGenerator::with_options(false, false, true, false, false);
        let doc = document("resume_john.pdf");
        assert!(matches!(
            generator.generate_report(&doc, OutputFormat::Pdf),
            Err(ResumeAnalyzerError::ExportGeneration(_))
        ));
        let text = generator.generate(&doc, OutputFormat::Text).unwrap();
        assert!(String::from_utf8(text).unwrap().starts_with(REPORT_TITLE));
    }

    #[test]
    fn test_save_export_creates_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("report.txt");

        save_export(b"first", &target).unwrap();
        save_export(b"second", &target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        let entries: Vec<_> = fs::read_dir(target.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_export_failure_is_export_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let result = save_export(b"data", &blocker.join("report.txt"));
        assert!(matches!(result, Err(ResumeAnalyzerError::ExportGeneration(_))));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Pdf, "resume_john.pdf"), "resume_john_analysis.pdf");
        assert_eq!(suggest_filename(OutputFormat::Console, "cv.pdf"), "cv_analysis.txt");
        assert_eq!(suggest_filename(OutputFormat::Markdown, ""), "resume_analysis.md");
    }
}
