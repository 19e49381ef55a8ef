use bloomsense_core::models::question::{AnswerSet, Question};
use bloomsense_core::models::screening::{ItemResult, RiskLevel, ScoredItem, ScoringResult};

/// Number of failed items at which a screen is positive. Fixed by the
/// M-CHAT-R/F scoring rules.
pub const SCREEN_POSITIVE_THRESHOLD: usize = 2;

/// Classify a single answer token.
///
/// Only `"no"` (any case) fails. Any other token passes, and so does a
/// missing answer.
// TODO: decide with the clinical team whether an unanswered item should
// block scoring instead of counting as a pass.
pub fn classify(answer: Option<&str>) -> ItemResult {
    match answer {
        Some(token) if token.eq_ignore_ascii_case("no") => ItemResult::Fail,
        _ => ItemResult::Pass,
    }
}

/// Questions in scoring order.
///
/// Questions carrying an `order` come first, sorted by it; the rest follow.
/// The sort is stable, so ties and unordered questions keep input order.
pub fn in_scoring_order(questions: &[Question]) -> Vec<&Question> {
    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by_key(|q| (q.order.is_none(), q.order));
    ordered
}

/// Score a questionnaire. Pure: the same inputs always give the same result.
pub fn score(questions: &[Question], answers: &AnswerSet) -> ScoringResult {
    let items: Vec<ScoredItem> = in_scoring_order(questions)
        .into_iter()
        .map(|question| {
            let answer = answers.get(&question.id);
            ScoredItem {
                question: question.clone(),
                answer: answer.map(str::to_string),
                result: classify(answer),
            }
        })
        .collect();

    summarize(items)
}

/// Rebuild a result from scored items, reclassifying each from its answer.
///
/// Counts, the screen flag and the risk level are derived here and nowhere
/// else, so a result assembled elsewhere (e.g. received over the wire) can
/// be brought back in line with its items. Item order is kept.
pub fn summarize(items: Vec<ScoredItem>) -> ScoringResult {
    let items: Vec<ScoredItem> = items
        .into_iter()
        .map(|item| ScoredItem {
            result: classify(item.answer.as_deref()),
            ..item
        })
        .collect();

    let total_questions = items.len();
    let fail_count = items
        .iter()
        .filter(|i| i.result == ItemResult::Fail)
        .count();
    let screen_positive = fail_count >= SCREEN_POSITIVE_THRESHOLD;

    ScoringResult {
        items,
        pass_count: total_questions - fail_count,
        fail_count,
        total_questions,
        screen_positive,
        risk_level: RiskLevel::from_screen_positive(screen_positive),
    }
}

/// Clinician-facing summary of what a result means.
pub fn interpretation(result: &ScoringResult) -> String {
    if result.screen_positive {
        format!(
            "The child has failed {} out of {} items. According to M-CHAT-R/F criteria, \
             this indicates a screen positive result. Strongly recommended: referral for \
             early intervention and diagnostic testing.",
            result.fail_count, result.total_questions
        )
    } else {
        format!(
            "The child has failed {} out of {} items. According to M-CHAT-R/F criteria, \
             this indicates a screen negative result. Continue routine developmental monitoring.",
            result.fail_count, result.total_questions
        )
    }
}
