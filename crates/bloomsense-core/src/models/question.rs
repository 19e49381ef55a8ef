use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A single screening question as served by the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// Unique within one question set.
    pub id: String,
    pub text: String,
    /// Display and scoring position. Questions without one keep their
    /// position in the set they came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// M-CHAT critical item. Informational; scoring treats every item alike.
    #[serde(default)]
    pub critical: bool,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            order: None,
            critical: false,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }
}

/// A clinician's answer to a yes/no screening item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Answer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Answer::Yes),
            "no" => Ok(Answer::No),
            _ => Err(CoreError::InvalidAnswer(s.to_string())),
        }
    }
}

/// Answers keyed by question id.
///
/// Tokens are kept exactly as recorded. A screening session only ever stores
/// `"yes"`/`"no"`, but sets received from elsewhere may hold anything and the
/// scorer copes with that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct AnswerSet(#[ts(type = "Record<string, string>")] BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw token, replacing any earlier answer to the same question.
    pub fn insert(&mut self, question_id: impl Into<String>, token: impl Into<String>) {
        self.0.insert(question_id.into(), token.into());
    }

    pub fn record(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.insert(question_id, answer.as_str());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Ids of the given questions that have no answer yet, in question order.
    pub fn unanswered<'q>(&self, questions: &'q [Question]) -> Vec<&'q str> {
        questions
            .iter()
            .filter(|q| !self.contains(&q.id))
            .map(|q| q.id.as_str())
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
