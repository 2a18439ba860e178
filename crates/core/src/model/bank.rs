use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Question, QuestionError, QuestionRecord};
use crate::model::topic::{Topic, TopicError, TopicSet};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("question {id} uses topic {topic:?} which is not in the configured topic set")]
    UnknownTopic { id: QuestionId, topic: String },

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Topic(#[from] TopicError),
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Immutable, validated question bank plus its configured topic set.
///
/// The topic set is configuration supplied with the bank, not derived from
/// it: a configured topic may have zero questions, and grouped scoring still
/// reports it with `total = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BankRecord", into = "BankRecord")]
pub struct QuestionBank {
    topics: TopicSet,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate and construct a bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` for an empty question list,
    /// `BankError::DuplicateId` for a repeated id, and
    /// `BankError::UnknownTopic` when a question's topic is not in the
    /// configured set.
    pub fn new(topics: TopicSet, questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
            if !topics.contains(question.topic()) {
                return Err(BankError::UnknownTopic {
                    id: question.id(),
                    topic: question.topic().as_str().to_string(),
                });
            }
        }

        Ok(Self { topics, questions })
    }

    #[must_use]
    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── WIRE FORM ─────────────────────────────────────────────────────────────────
//

/// Raw form of a bank file: the configured topic list plus question records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankRecord {
    pub topics: Vec<String>,
    pub questions: Vec<QuestionRecord>,
}

impl TryFrom<BankRecord> for QuestionBank {
    type Error = BankError;

    fn try_from(record: BankRecord) -> Result<Self, Self::Error> {
        let topics = record
            .topics
            .into_iter()
            .map(Topic::new)
            .collect::<Result<Vec<_>, _>>()?;
        let topics = TopicSet::new(topics)?;

        let questions = record
            .questions
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        QuestionBank::new(topics, questions)
    }
}

impl From<QuestionBank> for BankRecord {
    fn from(bank: QuestionBank) -> Self {
        Self {
            topics: bank
                .topics
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            questions: bank
                .questions
                .into_iter()
                .map(QuestionRecord::from)
                .collect(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
