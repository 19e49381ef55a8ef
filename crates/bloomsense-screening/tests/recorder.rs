mod common;

use uuid::Uuid;

use bloomsense_core::models::question::AnswerSet;
use bloomsense_core::models::screening::{RiskLevel, ScoringResult};
use bloomsense_instruments::Instrument;
use bloomsense_instruments::instruments::mchat_rf::MChatRf;
use bloomsense_instruments::scoring::score;
use bloomsense_screening::error::ScreeningError;
use bloomsense_screening::recorder::{AssessmentRecorder, RecordOutcome};
use bloomsense_screening::session::ScreeningSession;

use common::MemorySink;

fn positive_result() -> ScoringResult {
    let answers: AnswerSet = [("1", "no"), ("2", "no")].into_iter().collect();
    score(MChatRf.default_questions(), &answers)
}

#[tokio::test]
async fn first_call_creates_and_sets_marker() {
    let recorder = AssessmentRecorder::new(MemorySink::default());
    let mut marker = None;

    let outcome = recorder
        .record_if_absent(&mut marker, "patient-1", &positive_result(), Some("notes"))
        .await;

    let RecordOutcome::Created { assessment_id } = outcome.clone() else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(marker, Some(assessment_id));

    let rows = recorder.sink().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, assessment_id);
    assert_eq!(rows[0].1.patient_id, "patient-1");
    assert_eq!(rows[0].1.risk_level, RiskLevel::High);
    assert_eq!(rows[0].1.behavior_notes.as_deref(), Some("notes"));
}

#[tokio::test]
async fn repeated_calls_write_once() {
    let recorder = AssessmentRecorder::new(MemorySink::default());
    let result = positive_result();
    let mut marker = None;

    let first = recorder
        .record_if_absent(&mut marker, "patient-1", &result, None)
        .await;
    let second = recorder
        .record_if_absent(&mut marker, "patient-1", &result, None)
        .await;
    let third = recorder
        .record_if_absent(&mut marker, "patient-1", &result, None)
        .await;

    let id = first.assessment_id().unwrap();
    assert_eq!(second, RecordOutcome::AlreadyRecorded { assessment_id: id });
    assert_eq!(third, RecordOutcome::AlreadyRecorded { assessment_id: id });
    assert_eq!(recorder.sink().rows().len(), 1);
    assert_eq!(recorder.sink().attempts(), 1);
}

#[tokio::test]
async fn preset_marker_skips_the_sink() {
    let recorder = AssessmentRecorder::new(MemorySink::default());
    let existing = Uuid::new_v4();
    let mut marker = Some(existing);

    let outcome = recorder
        .record_if_absent(&mut marker, "patient-1", &positive_result(), None)
        .await;

    assert_eq!(outcome, RecordOutcome::AlreadyRecorded { assessment_id: existing });
    assert!(outcome.is_saved());
    assert_eq!(recorder.sink().attempts(), 0);
}

#[tokio::test]
async fn failure_leaves_marker_unset_and_retry_succeeds() {
    let recorder = AssessmentRecorder::new(MemorySink::failing(1));
    let result = positive_result();
    let mut marker = None;

    let failed = recorder
        .record_if_absent(&mut marker, "patient-2", &result, None)
        .await;
    assert!(matches!(failed, RecordOutcome::Failed { .. }));
    assert!(!failed.is_saved());
    assert_eq!(marker, None);
    assert!(recorder.sink().rows().is_empty());

    let retried = recorder
        .record_if_absent(&mut marker, "patient-2", &result, None)
        .await;
    assert!(matches!(retried, RecordOutcome::Created { .. }));
    assert_eq!(marker, retried.assessment_id());
    assert_eq!(recorder.sink().rows().len(), 1);
    assert_eq!(recorder.sink().attempts(), 2);
}

#[tokio::test]
async fn failure_does_not_touch_the_result() {
    let recorder = AssessmentRecorder::new(MemorySink::failing(5));
    let result = positive_result();
    let before = result.clone();
    let mut marker = None;

    let outcome = recorder
        .record_if_absent(&mut marker, "patient-3", &result, None)
        .await;

    assert!(matches!(outcome, RecordOutcome::Failed { ref reason } if reason.contains("sink unavailable")));
    assert_eq!(result, before);
}

fn finished_session() -> ScreeningSession {
    let mut session =
        ScreeningSession::new("child-7", MChatRf.default_questions().to_vec()).unwrap();
    for q in MChatRf.default_questions() {
        session.answer(&q.id, "yes").unwrap();
    }
    session.advance().unwrap();
    session.set_behavior_notes("Good eye contact.").unwrap();
    session.finish().unwrap();
    session
}

#[tokio::test]
async fn session_marker_guards_duplicate_saves() {
    let recorder = AssessmentRecorder::new(MemorySink::default());
    let mut session = finished_session();

    let first = recorder.record_session(&mut session).await.unwrap();
    let second = recorder.record_session(&mut session).await.unwrap();

    assert!(matches!(first, RecordOutcome::Created { .. }));
    assert!(matches!(second, RecordOutcome::AlreadyRecorded { .. }));
    assert_eq!(session.assessment_id(), first.assessment_id());

    let rows = recorder.sink().rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].1.patient_id, "child-7");
    assert_eq!(rows[0].1.behavior_notes.as_deref(), Some("Good eye contact."));
    assert_eq!(rows[0].1.mchat_answers.len(), 8);
    assert!(!rows[0].1.screen_positive);
}

#[tokio::test]
async fn unfinished_session_cannot_be_recorded() {
    let recorder = AssessmentRecorder::new(MemorySink::default());
    let mut session =
        ScreeningSession::new("child-8", MChatRf.default_questions().to_vec()).unwrap();

    let err = recorder.record_session(&mut session).await.unwrap_err();
    assert!(matches!(err, ScreeningError::WrongStage { .. }));
    assert_eq!(recorder.sink().attempts(), 0);
}
