use serde::Serialize;
use tera::{Context, Tera};

use bloomsense_core::models::screening::ScoringResult;
use bloomsense_instruments::scoring;

use crate::error::ExportError;

/// Built-in plain-text report layout (Tera syntax).
pub const TEXT_TEMPLATE: &str = include_str!("../templates/mchat_report.txt.tera");

const TEMPLATE_NAME: &str = "mchat_report.txt";

pub const REPORT_TITLE: &str = "M-CHAT-R/F Screening Results Report";
pub const NOT_ANSWERED: &str = "Not answered";
pub const NO_NOTES: &str = "No behavior observations recorded.";

const ATTRIBUTION: [&str; 2] = [
    "© 2009 Diana Robins, Deborah Fein, & Marianne Barton",
    "M-CHAT-R/F™ - Modified Checklist for Autism in Toddlers, Revised, with Follow-Up",
];

/// Everything a report shows, flattened to strings and numbers so every
/// output format reads the same values.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub title: String,
    pub generated_at: String,
    pub total_questions: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub risk_level: String,
    pub screen_result: String,
    pub interpretation: String,
    pub items: Vec<ReportItem>,
    pub behavior_notes: String,
    pub attribution: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub number: usize,
    pub question: String,
    pub answer: String,
    pub result: String,
}

/// Build the report context for a scored screening.
pub fn report_context(
    result: &ScoringResult,
    behavior_notes: Option<&str>,
    generated_at: jiff::Timestamp,
) -> ReportContext {
    let items = result
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| ReportItem {
            number: idx + 1,
            question: item.question.text.clone(),
            answer: item
                .answer
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(NOT_ANSWERED)
                .to_string(),
            result: item.result.to_string(),
        })
        .collect();

    let screen_result = if result.screen_positive {
        "SCREEN POSITIVE"
    } else {
        "SCREEN NEGATIVE"
    };

    ReportContext {
        title: REPORT_TITLE.to_string(),
        generated_at: generated_at.strftime("%Y-%m-%d %H:%M:%S UTC").to_string(),
        total_questions: result.total_questions,
        pass_count: result.pass_count,
        fail_count: result.fail_count,
        risk_level: result.risk_level.to_string(),
        screen_result: screen_result.to_string(),
        interpretation: scoring::interpretation(result),
        items,
        behavior_notes: behavior_notes
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(NO_NOTES)
            .to_string(),
        attribution: ATTRIBUTION.iter().map(|s| s.to_string()).collect(),
    }
}

/// Render the plain-text report for a context.
pub fn render_text(context: &ReportContext) -> Result<String, ExportError> {
    render_with_template(TEMPLATE_NAME, TEXT_TEMPLATE, context)
}

/// Render a context with a caller-supplied Tera template.
pub fn render_with_template(
    template_name: &str,
    template_content: &str,
    context: &ReportContext,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}
