mod common;

use serde_json::json;

use bloomsense_core::models::question::AnswerSet;
use bloomsense_instruments::instruments::mchat_rf::MChatRf;
use bloomsense_instruments::scoring::score;
use bloomsense_screening::bank::{BankOrigin, load_question_bank};
use bloomsense_screening::session::ScreeningSession;

use common::{FixedSource, OfflineSource};

fn default_ids() -> Vec<String> {
    (1..=8).map(|i| i.to_string()).collect()
}

#[tokio::test]
async fn provider_questions_are_normalized() {
    let source = FixedSource(vec![
        json!({ "question_id": 10, "question_text": "Second", "question_order": 2 }),
        json!({ "question_id": 11, "question_text": "First", "question_order": 1, "critical_item": true }),
    ]);

    let bank = load_question_bank(&source, &MChatRf).await;
    assert_eq!(bank.origin, BankOrigin::Provider);
    assert_eq!(bank.fallback_reason, None);
    assert_eq!(bank.instrument_id, "mchat_rf");
    assert_eq!(bank.questions.len(), 2);
    assert_eq!(bank.questions[1].id, "11");
    assert!(bank.questions[1].critical);

    let result = score(&bank.questions, &AnswerSet::new());
    assert_eq!(result.items[0].question.text, "First");
}

#[tokio::test]
async fn empty_provider_falls_back_to_defaults() {
    let bank = load_question_bank(&FixedSource(Vec::new()), &MChatRf).await;

    assert_eq!(bank.origin, BankOrigin::Fallback);
    let ids: Vec<String> = bank.questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids, default_ids());

    // scoring proceeds against the fallback set
    let answers: AnswerSet = [("1", "no"), ("8", "no")].into_iter().collect();
    let result = score(&bank.questions, &answers);
    assert_eq!(result.total_questions, 8);
    assert!(result.screen_positive);
}

#[tokio::test]
async fn provider_error_falls_back() {
    let bank = load_question_bank(&OfflineSource, &MChatRf).await;
    assert_eq!(bank.origin, BankOrigin::Fallback);
    assert_eq!(bank.questions.len(), 8);
    assert!(bank.fallback_reason.unwrap().contains("provider offline"));
}

#[tokio::test]
async fn malformed_record_falls_back() {
    let source = FixedSource(vec![
        json!({ "id": "1", "text": "Fine" }),
        json!({ "id": "2", "text": 17 }),
    ]);

    let bank = load_question_bank(&source, &MChatRf).await;
    assert_eq!(bank.origin, BankOrigin::Fallback);
    assert_eq!(bank.questions.len(), 8);
}

#[tokio::test]
async fn session_uses_loaded_bank() {
    let bank = load_question_bank(&FixedSource(Vec::new()), &MChatRf).await;
    let session = ScreeningSession::from_bank("child-3", &bank).unwrap();
    assert_eq!(session.questions().len(), 8);
    assert_eq!(session.progress(), (0, 8));
}

#[tokio::test]
async fn bank_serializes_origin() {
    let bank = load_question_bank(&OfflineSource, &MChatRf).await;
    let value = serde_json::to_value(&bank).unwrap();
    assert_eq!(value["origin"], "fallback");
    assert_eq!(value["questions"].as_array().unwrap().len(), 8);
}
