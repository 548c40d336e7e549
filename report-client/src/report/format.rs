/// Characters dropped from the model output before formatting.
const STRIPPED_MARKUP: [char; 2] = ['*', '#'];

/// One line of a formatted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// A `label: value` line with exactly one colon, both sides trimmed.
    Labeled { label: String, value: String },
    /// Any other line, kept as-is.
    Plain(String),
}

impl ReportLine {
    /// Classify a single line by its colon count.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(label), Some(value), None) => ReportLine::Labeled {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            },
            _ => ReportLine::Plain(line.to_string()),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            ReportLine::Labeled { label, value } => format!("<strong>{}</strong>: {}", label, value),
            ReportLine::Plain(line) => line.clone(),
        }
    }
}

/// Strip markup characters and classify each `\n`-separated line.
pub fn format_lines(text: &str) -> Vec<ReportLine> {
    let cleaned: String = text.chars().filter(|c| !STRIPPED_MARKUP.contains(c)).collect();
    cleaned.split('\n').map(ReportLine::parse).collect()
}

/// Render model output as HTML: bold labels, `<br/>` between lines.
///
/// The text is not HTML-escaped.
pub fn format_response_text(text: &str) -> String {
    format_lines(text)
        .iter()
        .map(ReportLine::to_html)
        .collect::<Vec<_>>()
        .join("<br/>")
}
