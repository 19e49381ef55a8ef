use bloomsense_core::models::question::AnswerSet;
use bloomsense_core::models::screening::{RiskLevel, ScoringResult};
use bloomsense_export::render::{NO_NOTES, NOT_ANSWERED, render_text, report_context};
use bloomsense_export::report::{ReportFormat, export_report, report_filename};
use bloomsense_export::styles::DocumentStyles;
use bloomsense_instruments::Instrument;
use bloomsense_instruments::instruments::mchat_rf::MChatRf;
use bloomsense_instruments::scoring::{score, summarize};

fn generated_at() -> jiff::Timestamp {
    "2026-03-04T10:15:00Z".parse().unwrap()
}

fn positive_result() -> ScoringResult {
    let mut answers: AnswerSet = (3..=7).map(|i| (i.to_string(), "yes")).collect();
    answers.insert("1", "no");
    answers.insert("2", "No");
    // question 8 left unanswered
    score(MChatRf.default_questions(), &answers)
}

#[test]
fn text_report_contains_summary() {
    let context = report_context(&positive_result(), Some("Limited eye contact."), generated_at());
    let text = render_text(&context).unwrap();

    assert!(text.starts_with("M-CHAT-R/F Screening Results Report"));
    assert!(text.contains("Generated: 2026-03-04 10:15:00 UTC"));
    assert!(text.contains("Total Questions: 8"));
    assert!(text.contains("Passed: 6"));
    assert!(text.contains("Failed: 2"));
    assert!(text.contains("Risk Level: High Risk"));
    assert!(text.contains("Screen Result: SCREEN POSITIVE"));
    assert!(text.contains("Limited eye contact."));
    assert!(text.contains("Diana Robins"));
}

#[test]
fn text_report_lists_every_item() {
    let result = positive_result();
    let text = render_text(&report_context(&result, None, generated_at())).unwrap();

    for (idx, item) in result.items.iter().enumerate() {
        assert!(
            text.contains(&format!("{}. {}", idx + 1, item.question.text)),
            "missing item {}",
            item.question.id
        );
    }
    assert!(text.contains("   Answer: No\n   Result: Fail"));
    assert!(text.contains(&format!("   Answer: {NOT_ANSWERED}\n   Result: Pass")));
}

#[test]
fn text_report_is_not_html_escaped() {
    let result = positive_result();
    let text = render_text(&report_context(&result, Some("Plays with \"blocks\" & cars"), generated_at()))
        .unwrap();
    assert!(text.contains("bounced on your knee, etc.?"));
    assert!(text.contains("hide-and-seek"));
    assert!(text.contains("Plays with \"blocks\" & cars"));
}

#[test]
fn missing_notes_use_placeholder() {
    let context = report_context(&positive_result(), Some("   "), generated_at());
    assert_eq!(context.behavior_notes, NO_NOTES);

    let text = render_text(&context).unwrap();
    assert!(text.contains(NO_NOTES));
}

#[test]
fn negative_screen_is_reported() {
    let result = score(MChatRf.default_questions(), &AnswerSet::new());
    let text = render_text(&report_context(&result, None, generated_at())).unwrap();
    assert!(text.contains("Risk Level: Low Risk"));
    assert!(text.contains("Screen Result: SCREEN NEGATIVE"));
}

#[test]
fn rendering_is_deterministic() {
    let result = positive_result();
    let a = render_text(&report_context(&result, Some("n"), generated_at())).unwrap();
    let b = render_text(&report_context(&result, Some("n"), generated_at())).unwrap();
    assert_eq!(a, b);
}

#[test]
fn filename_carries_the_date() {
    assert_eq!(
        report_filename(ReportFormat::Text, generated_at()),
        "M-CHAT-R-F_Results_2026-03-04.txt"
    );
    assert_eq!(
        report_filename(ReportFormat::Docx, generated_at()),
        "M-CHAT-R-F_Results_2026-03-04.docx"
    );
}

#[test]
fn formats_parse_from_query_values() {
    assert_eq!("TXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
    assert_eq!("docx".parse::<ReportFormat>().unwrap(), ReportFormat::Docx);
    assert!("pdf".parse::<ReportFormat>().is_err());
}

#[test]
fn text_export_is_utf8_download() {
    let report = export_report(
        ReportFormat::Text,
        &positive_result(),
        None,
        generated_at(),
        &DocumentStyles::default(),
    )
    .unwrap();

    assert_eq!(report.filename, "M-CHAT-R-F_Results_2026-03-04.txt");
    assert!(report.content_type.starts_with("text/plain"));
    let body = String::from_utf8(report.body).unwrap();
    assert!(body.contains("Risk Level: High Risk"));
}

#[test]
fn docx_export_is_a_zip_package() {
    let report = export_report(
        ReportFormat::Docx,
        &positive_result(),
        Some("Line one\nLine two"),
        generated_at(),
        &DocumentStyles::default(),
    )
    .unwrap();

    assert!(report.filename.ends_with(".docx"));
    assert!(report.body.starts_with(b"PK"));
}

#[test]
fn notes_are_rendered_verbatim() {
    let notes = "  Points to request.\n    Lines up toys.";
    let context = report_context(&positive_result(), Some(notes), generated_at());
    assert_eq!(context.behavior_notes, notes);

    let text = render_text(&context).unwrap();
    assert!(text.contains("  Points to request.\n    Lines up toys."));
}

#[test]
fn report_from_rescored_items_is_consistent() {
    let tampered = ScoringResult {
        items: Vec::new(),
        pass_count: 5,
        fail_count: 0,
        total_questions: 1,
        screen_positive: true,
        risk_level: RiskLevel::Low,
    };

    let text = render_text(&report_context(&summarize(tampered.items), None, generated_at())).unwrap();
    assert!(text.contains("Total Questions: 0"));
    assert!(text.contains("Passed: 0"));
    assert!(text.contains("Failed: 0"));
    assert!(text.contains("Risk Level: Low Risk"));
    assert!(text.contains("Screen Result: SCREEN NEGATIVE"));
}
