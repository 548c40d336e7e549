//! A4 PDF export of a formatted report.
//!
//! [`layout`] wraps lines and splits pages; [`render_pdf`] draws the result
//! with the built-in Helvetica faces.

use super::format::ReportLine;
use crate::error::ReportError;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt};
use std::ops::Range;

/// A4 portrait, in points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const MARGIN_PT: f32 = 40.0;
/// Usable text width from the left margin.
pub const CONTENT_WIDTH_PT: f32 = 522.0;

const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_PT: f32 = 15.0;
/// Rough Helvetica advance per character, as a fraction of the font size.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Filename offered for every export.
pub const PDF_FILENAME: &str = "report.pdf";

/// One visual line on a page: a bold prefix followed by regular text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub bold: String,
    pub regular: String,
}

/// Characters that fit on one line of the content box.
fn max_chars_per_line() -> usize {
    (CONTENT_WIDTH_PT / (FONT_SIZE_PT * AVG_CHAR_WIDTH_EM)) as usize
}

/// Lines that fit between the top and bottom margins.
fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_PT - 2.0 * MARGIN_PT) / LINE_HEIGHT_PT) as usize
}

/// Characters outside Latin-1 that the built-in fonts' WinAnsi encoding
/// still carries.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Map text onto what the built-in fonts can draw; anything else becomes `?`.
fn to_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '₹' => out.push_str("Rs."),
            '\t' => out.push(' '),
            ' '..='~' | '\u{a0}'..='\u{ff}' => out.push(ch),
            _ if WIN_ANSI_EXTRAS.contains(ch) => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

/// Greedy word wrap into byte ranges of `text`, breaking at spaces when
/// possible and mid-word otherwise. Spaces at a break are dropped.
fn wrap_ranges(text: &str, max_chars: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut last_space = None;
    let mut count = 0;

    for (idx, ch) in text.char_indices() {
        if idx < start {
            continue;
        }
        if ch == ' ' {
            last_space = Some(idx);
        }
        count += 1;

        if count > max_chars {
            let end = last_space.filter(|&space| space > start).unwrap_or(idx);
            ranges.push(start..end);
            start = end + text[end..].len() - text[end..].trim_start_matches(' ').len();
            let next = idx + ch.len_utf8();
            count = if start < next { text[start..next].chars().count() } else { 0 };
            last_space = None;
        }
    }

    if start < text.len() || ranges.is_empty() {
        ranges.push(start..text.len());
    }
    ranges
}

/// Wrap one report line into visual lines, keeping the label bold.
fn place_line(line: &ReportLine, max_chars: usize) -> Vec<PlacedLine> {
    let (text, bold_end) = match line {
        ReportLine::Labeled { label, value } => {
            let label = to_win_ansi(label);
            (format!("{}: {}", label, to_win_ansi(value)), label.len())
        }
        ReportLine::Plain(text) => (to_win_ansi(text.trim_end_matches('\r')), 0),
    };

    wrap_ranges(&text, max_chars)
        .into_iter()
        .map(|range| {
            let split = bold_end.clamp(range.start, range.end);
            PlacedLine {
                bold: text[range.start..split].to_string(),
                regular: text[split..range.end].to_string(),
            }
        })
        .collect()
}

/// Split a report into pages of visual lines.
pub fn layout(lines: &[ReportLine]) -> Vec<Vec<PlacedLine>> {
    let max_chars = max_chars_per_line();
    let placed: Vec<PlacedLine> = lines
        .iter()
        .flat_map(|line| place_line(line, max_chars))
        .collect();

    if placed.is_empty() {
        return vec![Vec::new()];
    }

    placed
        .chunks(lines_per_page())
        .map(<[PlacedLine]>::to_vec)
        .collect()
}

fn draw_page(
    layer: &PdfLayerReference,
    lines: &[PlacedLine],
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let mut baseline = PAGE_HEIGHT_PT - MARGIN_PT - FONT_SIZE_PT;

    for line in lines {
        layer.begin_text_section();
        layer.set_text_cursor(Mm::from(Pt(MARGIN_PT)), Mm::from(Pt(baseline)));
        if !line.bold.is_empty() {
            layer.set_font(bold, FONT_SIZE_PT);
            layer.write_text(line.bold.clone(), bold);
        }
        if !line.regular.is_empty() {
            layer.set_font(regular, FONT_SIZE_PT);
            layer.write_text(line.regular.clone(), regular);
        }
        layer.end_text_section();

        baseline -= LINE_HEIGHT_PT;
    }
}

/// Render the report as PDF bytes.
pub fn render_pdf(lines: &[ReportLine]) -> Result<Vec<u8>, ReportError> {
    let page_width = Mm::from(Pt(PAGE_WIDTH_PT));
    let page_height = Mm::from(Pt(PAGE_HEIGHT_PT));

    let (doc, first_page, first_layer) =
        PdfDocument::new("Report", page_width, page_height, "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("{:?}", e)))?;

    for (index, page_lines) in layout(lines).iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(page_width, page_height, "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, page_lines, &regular, &bold);
    }

    doc.save_to_bytes().map_err(|e| ReportError::Pdf(format!("{:?}", e)))
}
