use serde::{Deserialize, Serialize};

/// Document styling configuration for DOCX reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Times New Roman", "Calibri").
    pub body_font: String,

    /// Font for headings (e.g. "Arial", "Calibri").
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Report title size in points.
    pub heading1_size: usize,

    /// Section heading size in points.
    pub heading2_size: usize,

    /// Size of the attribution footer in points.
    pub footnote_size: usize,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading1_size: 16,
            heading2_size: 13,
            footnote_size: 8,
        }
    }
}
