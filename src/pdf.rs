//! PDF rendering of the daily report
//!
//! A4 portrait: centered bold title, centered generation timestamp, body text
//! wrapped to a fixed width and a footer line. Body text that does not fit
//! continues on further pages.

use chrono::{DateTime, Local};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::config::ExportConfig;
use crate::error::Result;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const TITLE_PT: f32 = 18.0;
const STAMP_PT: f32 = 10.0;
const BODY_PT: f32 = 10.0;
const FOOTER_PT: f32 = 8.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.5;

/// Page layout settings
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pub title: String,
    pub footer: String,
    pub wrap_width_mm: f32,
}

impl From<&ExportConfig> for PdfLayout {
    fn from(cfg: &ExportConfig) -> Self {
        Self {
            title: cfg.pdf_title.clone(),
            footer: cfg.pdf_footer.clone(),
            wrap_width_mm: cfg.wrap_width_mm,
        }
    }
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            title: "Daily Trading Research Report".to_string(),
            footer: "Generated by Trading Research Journal".to_string(),
            wrap_width_mm: 180.0,
        }
    }
}

impl PdfLayout {
    /// Characters that fit on one body line
    pub fn body_columns(&self) -> usize {
        let glyph_mm = BODY_PT * AVG_GLYPH_EM * PT_TO_MM;
        ((self.wrap_width_mm / glyph_mm).floor() as usize).max(1)
    }

    fn line_height_mm(size_pt: f32) -> f32 {
        size_pt * PT_TO_MM * 1.4
    }

    /// Body lines per page: the first page loses room to the title block
    fn lines_per_page(first: bool) -> usize {
        let top = if first { 255.0 } else { PAGE_HEIGHT_MM - 20.0 };
        let bottom = MARGIN_MM + 10.0;
        ((top - bottom) / Self::line_height_mm(BODY_PT)).floor() as usize
    }
}

/// Split text into lines no longer than `columns`, breaking on whitespace
/// where possible and keeping blank lines.
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word = word.to_string();
            // Hard-split words longer than a whole line
            while word.chars().count() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(columns).collect();
                word = word.chars().skip(columns).collect();
                lines.push(head);
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > columns && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Group wrapped body lines into pages
pub fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut remaining = lines.into_iter().peekable();
    let mut first = true;
    loop {
        let take = PdfLayout::lines_per_page(first);
        let page: Vec<String> = remaining.by_ref().take(take).collect();
        pages.push(page);
        first = false;
        if remaining.peek().is_none() {
            break;
        }
    }
    pages
}

fn centered_x(text: &str, size_pt: f32) -> Mm {
    let width = text.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM;
    Mm(((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM))
}

fn draw_footer(layer: &PdfLayerReference, footer: &str, font: &IndirectFontRef) {
    layer.use_text(footer, FOOTER_PT, centered_x(footer, FOOTER_PT), Mm(MARGIN_MM), font);
}

/// Render the report text to PDF bytes
pub fn render_report_pdf(
    text: &str,
    generated_at: DateTime<Local>,
    layout: &PdfLayout,
) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        layout.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Report",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let pages = paginate(wrap_text(text, layout.body_columns()));
    let body_step = PdfLayout::line_height_mm(BODY_PT);

    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");
            doc.get_page(page).get_layer(layer)
        };

        let mut y = if index == 0 {
            layer.use_text(
                layout.title.as_str(),
                TITLE_PT,
                centered_x(&layout.title, TITLE_PT),
                Mm(PAGE_HEIGHT_MM - 20.0),
                &bold,
            );
            let stamp = format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
            layer.use_text(
                stamp.as_str(),
                STAMP_PT,
                centered_x(&stamp, STAMP_PT),
                Mm(PAGE_HEIGHT_MM - 28.0),
                &regular,
            );
            255.0
        } else {
            PAGE_HEIGHT_MM - 20.0
        };

        for line in lines {
            if !line.is_empty() {
                layer.use_text(line.as_str(), BODY_PT, Mm(MARGIN_MM), Mm(y), &regular);
            }
            y -= body_step;
        }

        draw_footer(&layer, &layout.footer, &regular);
    }

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width_and_blank_lines() {
        let lines = wrap_text("alpha beta gamma delta\n\nepsilon", 11);
        assert_eq!(
            lines,
            vec!["alpha beta", "gamma delta", "", "epsilon"]
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 11));
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_body_columns_for_default_width() {
        let layout = PdfLayout::default();
        assert_eq!(layout.body_columns(), 102);
    }

    #[test]
    fn test_paginate_overflows_to_new_pages() {
        let first = PdfLayout::lines_per_page(true);
        let lines: Vec<String> = (0..first + 3).map(|i| format!("line {i}")).collect();
        let pages = paginate(lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), first);
        assert_eq!(pages[1].len(), 3);
    }

    #[test]
    fn test_paginate_empty_text_has_one_page() {
        assert_eq!(paginate(Vec::new()).len(), 1);
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_report_pdf(
            "DAILY TRADING RESEARCH REPORT\nDate: N/A",
            Local::now(),
            &PdfLayout::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
