use bloomsense_core::models::question::{AnswerSet, Question};
use bloomsense_core::models::screening::ScoringResult;

use crate::Instrument;
use crate::scoring;

/// M-CHAT-R/F: Modified Checklist for Autism in Toddlers, Revised, with
/// Follow-Up. Yes/no items; a "no" fails the item. Two or more failures is
/// a positive screen.
pub struct MChatRf;

impl Instrument for MChatRf {
    fn id(&self) -> &str {
        "mchat_rf"
    }

    fn name(&self) -> &str {
        "M-CHAT-R/F"
    }

    fn default_questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            let items = [
                ("1", "Does your child enjoy being swung, bounced on your knee, etc.?", false),
                ("2", "Does your child take an interest in other children?", true),
                ("3", "Does your child like climbing on things, such as up stairs?", false),
                ("4", "Does your child enjoy playing peek-a-boo/hide-and-seek?", false),
                (
                    "5",
                    "Does your child ever pretend, for example, to talk on the phone or take care of dolls?",
                    false,
                ),
                (
                    "6",
                    "Does your child ever point with the index finger to ask for something?",
                    false,
                ),
                (
                    "7",
                    "Does your child ever point with the index finger to indicate interest in something?",
                    true,
                ),
                (
                    "8",
                    "Can your child play properly with small toys without just mouthing, fiddling, or dropping them?",
                    false,
                ),
            ];

            items
                .iter()
                .zip(1..)
                .map(|((id, text, critical), order)| Question {
                    id: id.to_string(),
                    text: text.to_string(),
                    order: Some(order),
                    critical: *critical,
                })
                .collect()
        });
        &QUESTIONS
    }

    fn score(&self, questions: &[Question], answers: &AnswerSet) -> ScoringResult {
        scoring::score(questions, answers)
    }

    fn interpretation(&self, result: &ScoringResult) -> String {
        scoring::interpretation(result)
    }
}
