use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bloomsense_core::models::screening::ScoringResult;

use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::render::{render_text, report_context};
use crate::styles::DocumentStyles;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Docx,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain; charset=utf-8",
            ReportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for ReportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "docx" => Ok(ReportFormat::Docx),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A finished report, ready to hand to the user as a download.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// `M-CHAT-R-F_Results_<date>.<ext>`, dated in UTC.
pub fn report_filename(format: ReportFormat, generated_at: jiff::Timestamp) -> String {
    format!(
        "M-CHAT-R-F_Results_{}.{}",
        generated_at.strftime("%Y-%m-%d"),
        format.extension()
    )
}

/// Produce a downloadable report from an already-computed result. No
/// storage access: everything comes from the arguments.
pub fn export_report(
    format: ReportFormat,
    result: &ScoringResult,
    behavior_notes: Option<&str>,
    generated_at: jiff::Timestamp,
    styles: &DocumentStyles,
) -> Result<ExportedReport, ExportError> {
    let context = report_context(result, behavior_notes, generated_at);
    let body = match format {
        ReportFormat::Text => render_text(&context)?.into_bytes(),
        ReportFormat::Docx => generate_docx(&context, styles)?,
    };

    tracing::debug!(
        format = format.extension(),
        bytes = body.len(),
        "exported screening report"
    );

    Ok(ExportedReport {
        filename: report_filename(format, generated_at),
        content_type: format.content_type(),
        body,
    })
}
