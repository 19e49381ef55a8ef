use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bloomsense_core::models::question::{Answer, AnswerSet, Question};
use bloomsense_core::models::screening::ScoringResult;
use bloomsense_instruments::normalize::check_unique_ids;
use bloomsense_instruments::scoring;

use crate::bank::QuestionBank;
use crate::error::ScreeningError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStage {
    /// Answering the M-CHAT checklist.
    Questionnaire,
    /// Writing behavior observations.
    BehaviorObservation,
    /// Scored; answers and notes are frozen.
    Complete,
}

impl fmt::Display for ScreeningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScreeningStage::Questionnaire => "questionnaire",
            ScreeningStage::BehaviorObservation => "behavior observation",
            ScreeningStage::Complete => "complete",
        })
    }
}

/// One clinical screening encounter for one patient.
///
/// Holds everything the encounter accumulates: answers, notes, the scored
/// result once finished, and the id of the stored assessment once recorded.
/// The caller owns the session; nothing here is global.
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    patient_id: String,
    questions: Vec<Question>,
    answers: AnswerSet,
    behavior_notes: String,
    stage: ScreeningStage,
    result: Option<ScoringResult>,
    assessment_id: Option<Uuid>,
}

impl ScreeningSession {
    /// Start a session. Question ids must be unique.
    pub fn new(
        patient_id: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, ScreeningError> {
        check_unique_ids(&questions)?;
        Ok(Self {
            patient_id: patient_id.into(),
            questions,
            answers: AnswerSet::new(),
            behavior_notes: String::new(),
            stage: ScreeningStage::Questionnaire,
            result: None,
            assessment_id: None,
        })
    }

    pub fn from_bank(
        patient_id: impl Into<String>,
        bank: &QuestionBank,
    ) -> Result<Self, ScreeningError> {
        Self::new(patient_id, bank.questions.clone())
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn stage(&self) -> ScreeningStage {
        self.stage
    }

    pub fn behavior_notes(&self) -> Option<&str> {
        let notes = self.behavior_notes.trim();
        (!notes.is_empty()).then_some(notes)
    }

    pub fn result(&self) -> Option<&ScoringResult> {
        self.result.as_ref()
    }

    /// Id of the stored assessment, once recorded.
    pub fn assessment_id(&self) -> Option<Uuid> {
        self.assessment_id
    }

    /// `(answered, total)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        let answered = self
            .questions
            .iter()
            .filter(|q| self.answers.contains(&q.id))
            .count();
        (answered, self.questions.len())
    }

    /// Record an answer. Tokens must be yes/no in any case; they are stored
    /// lower-cased.
    pub fn answer(&mut self, question_id: &str, token: &str) -> Result<(), ScreeningError> {
        self.expect_stage(ScreeningStage::Questionnaire)?;
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(ScreeningError::UnknownQuestion(question_id.to_string()));
        }
        let answer: Answer = token.parse()?;
        self.answers.record(question_id, answer);
        Ok(())
    }

    /// Apply several answers at once, stopping at the first bad one.
    pub fn answer_all<'a>(
        &mut self,
        answers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), ScreeningError> {
        for (question_id, token) in answers {
            self.answer(question_id, token)?;
        }
        Ok(())
    }

    /// Move on to behavior observations. Every question must be answered.
    pub fn advance(&mut self) -> Result<(), ScreeningError> {
        self.expect_stage(ScreeningStage::Questionnaire)?;
        let unanswered = self.answers.unanswered(&self.questions);
        if !unanswered.is_empty() {
            return Err(ScreeningError::Unanswered(
                unanswered.into_iter().map(str::to_string).collect(),
            ));
        }
        self.stage = ScreeningStage::BehaviorObservation;
        Ok(())
    }

    /// Return to the questionnaire to change answers.
    pub fn back(&mut self) -> Result<(), ScreeningError> {
        self.expect_stage(ScreeningStage::BehaviorObservation)?;
        self.stage = ScreeningStage::Questionnaire;
        Ok(())
    }

    pub fn set_behavior_notes(&mut self, notes: impl Into<String>) -> Result<(), ScreeningError> {
        self.expect_stage(ScreeningStage::BehaviorObservation)?;
        self.behavior_notes = notes.into();
        Ok(())
    }

    /// Score the screening and freeze it. Calling again on a finished
    /// session returns the same result.
    pub fn finish(&mut self) -> Result<&ScoringResult, ScreeningError> {
        if self.stage != ScreeningStage::Complete {
            self.expect_stage(ScreeningStage::BehaviorObservation)?;
            if self.behavior_notes().is_none() {
                return Err(ScreeningError::MissingBehaviorNotes);
            }
            self.result = Some(scoring::score(&self.questions, &self.answers));
            self.stage = ScreeningStage::Complete;
        }

        self.result
            .as_ref()
            .ok_or(ScreeningError::WrongStage {
                expected: ScreeningStage::Complete,
                actual: self.stage,
            })
    }

    /// Borrow what the recorder needs: the saved-marker mutably, the rest
    /// shared. `None` until the session is finished.
    pub(crate) fn record_parts(
        &mut self,
    ) -> Option<(&mut Option<Uuid>, &str, &ScoringResult, Option<&str>)> {
        let result = self.result.as_ref()?;
        let notes = self.behavior_notes.trim();
        Some((
            &mut self.assessment_id,
            self.patient_id.as_str(),
            result,
            (!notes.is_empty()).then_some(notes),
        ))
    }

    fn expect_stage(&self, expected: ScreeningStage) -> Result<(), ScreeningError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ScreeningError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }
}
