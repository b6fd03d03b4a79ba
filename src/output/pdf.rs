//! A4 PDF export built with printpdf's builtin Helvetica

use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::{ExportDocument, LineKind, REPORT_TITLE};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
/// Rough Helvetica advance relative to the font size
const AVG_GLYPH_WIDTH: f32 = 0.5;
const BULLET_INDENT_MM: f32 = 5.0;

/// One line of text fixed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Default)]
pub struct PdfFormatter;

impl PdfFormatter {
    pub fn new() -> Self {
        Self
    }

    fn style(kind: LineKind) -> (f32, bool) {
        match kind {
            LineKind::Title => (16.0, true),
            LineKind::Heading => (13.0, true),
            LineKind::Subheading => (11.5, true),
            LineKind::Bullet | LineKind::Body | LineKind::Blank => (10.5, false),
        }
    }

    fn line_height(font_size: f32) -> f32 {
        font_size * PT_TO_MM * LINE_SPACING
    }

    /// Wrap and paginate the plain report layout; y grows downwards from the top margin
    pub fn layout(&self, doc: &ExportDocument) -> Vec<Vec<PlacedLine>> {
        let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for line in doc.lines() {
            let (font_size, bold) = Self::style(line.kind);
            let height = Self::line_height(font_size);

            if line.kind == LineKind::Blank {
                y -= height / 2.0;
                continue;
            }

            let (indent, prefix) = match line.kind {
                LineKind::Bullet => (BULLET_INDENT_MM, "- "),
                _ => (0.0, ""),
            };
            let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent;
            let max_chars = (usable / (font_size * PT_TO_MM * AVG_GLYPH_WIDTH)) as usize;

            for (index, piece) in wrap_text(&sanitize(&line.text), max_chars.saturating_sub(prefix.len())).into_iter().enumerate() {
                if y - height < MARGIN_MM {
                    pages.push(Vec::new());
                    y = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                y -= height;

                let text = if index == 0 {
                    format!("{}{}", prefix, piece)
                } else {
                    format!("{}{}", " ".repeat(prefix.len()), piece)
                };
                if let Some(page) = pages.last_mut() {
                    page.push(PlacedLine {
                        text,
                        font_size,
                        bold,
                        x_mm: MARGIN_MM + indent,
                        y_mm: y,
                    });
                }
            }
        }

        pages
    }

    pub fn render(&self, doc: &ExportDocument) -> Result<Vec<u8>> {
        let pages = self.layout(doc);
        let (pdf, first_page, first_layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");

        let regular = pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                pdf.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) =
                    pdf.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Report page {}", index + 1));
                pdf.get_page(page_index).get_layer(layer_index)
            };

            for line in page {
                let font: &IndirectFontRef = if line.bold { &bold } else { &regular };
                layer.use_text(line.text.as_str(), line.font_size, Mm(line.x_mm), Mm(line.y_mm), font);
            }
        }

        log::debug!("Rendered PDF export with {} page(s)", pages.len());
        pdf.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(e: printpdf::Error) -> ResumeAnalyzerError {
    ResumeAnalyzerError::ExportGeneration(format!("PDF generation failed: {}", e))
}

/// Builtin fonts only cover a single-byte encoding
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            '’' | '‘' => '\'',
            '“' | '”' => '"',
            '–' | '—' => '-',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap; words longer than `max_chars` are split
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word.char_indices().nth(max_chars).map(|(i, _)| i).unwrap_or(word.len());
            let rest = word.split_off(split);
            lines.push(word);
            word = rest;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
