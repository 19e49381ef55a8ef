use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::render::ReportContext;
use crate::styles::DocumentStyles;

/// Generate a DOCX screening report.
///
/// Sections mirror the plain-text report: summary, one block per item,
/// behavior observations, then the instrument attribution.
pub fn generate_docx(context: &ReportContext, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size));

    docx = docx
        .add_paragraph(heading_paragraph(&context.title, "Heading1", styles))
        .add_paragraph(body_paragraph(
            &format!("Generated: {}", context.generated_at),
            styles,
        ))
        .add_paragraph(heading_paragraph("Screening Summary", "Heading2", styles));

    let summary = [
        ("Total Questions", context.total_questions.to_string()),
        ("Passed", context.pass_count.to_string()),
        ("Failed", context.fail_count.to_string()),
        ("Risk Level", context.risk_level.clone()),
        ("Screen Result", context.screen_result.clone()),
    ];
    for (label, value) in &summary {
        docx = docx.add_paragraph(labelled_paragraph(label, value, styles));
    }
    docx = docx
        .add_paragraph(body_paragraph(&context.interpretation, styles))
        .add_paragraph(heading_paragraph("Detailed Results", "Heading2", styles));

    for item in &context.items {
        docx = docx
            .add_paragraph(
                Paragraph::new().add_run(
                    body_run(&format!("{}. {}", item.number, item.question), styles).bold(),
                ),
            )
            .add_paragraph(labelled_paragraph("Answer", &item.answer, styles))
            .add_paragraph(labelled_paragraph("Result", &item.result, styles));
    }

    docx = docx.add_paragraph(heading_paragraph("Behavior Observations", "Heading2", styles));
    for line in context.behavior_notes.lines() {
        docx = docx.add_paragraph(body_paragraph(line, styles));
    }

    docx = docx.add_paragraph(Paragraph::new());
    for line in &context.attribution {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(body_run(line, styles).size(styles.footnote_size * 2)),
        );
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(text, styles))
}

/// `Label: value` with the label in bold.
fn labelled_paragraph(label: &str, value: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run(&format!("{label}: "), styles).bold())
        .add_run(body_run(value, styles))
}
