//! Report building blocks: the analysis prompt, the text-to-HTML formatter
//! and the PDF renderer. All of it is pure and network-free.

pub mod format;
pub mod pdf;
pub mod prompt;

pub use format::{format_lines, format_response_text, ReportLine};
pub use pdf::render_pdf;
pub use prompt::build_prompt;
