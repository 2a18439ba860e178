use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::Answer;
use crate::model::ids::QuestionId;
use crate::model::topic::{Topic, TopicError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must be positive")]
    ZeroId,

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} has an empty option at index {index}")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("correct option {index} is out of range for question {id} with {len} options")]
    CorrectOptionOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Topic(#[from] TopicError),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice question. Immutable once constructed; the correct
/// option index is always a valid index into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    topic: Topic,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: Option<String>,
}

impl Question {
    /// Validate and construct a question.
    ///
    /// # Errors
    ///
    /// Returns a `QuestionError` if the id is zero, the prompt or any option
    /// is empty after trimming, fewer than two options are given, or the
    /// correct option index is out of range.
    pub fn new(
        id: QuestionId,
        topic: Topic,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        if id.value() == 0 {
            return Err(QuestionError::ZeroId);
        }
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id, index });
        }
        if correct_option >= options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                id,
                index: correct_option,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            topic,
            prompt,
            options,
            correct_option,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Whether the given answer selects this question's correct option.
    ///
    /// The unanswered sentinel never matches, so unanswered questions count
    /// as incorrect without special-casing.
    #[must_use]
    pub fn is_correct(&self, answer: Answer) -> bool {
        answer.selected() == Some(self.correct_option)
    }
}

//
// ─── WIRE FORM ─────────────────────────────────────────────────────────────────
//

/// Raw form of a question as it appears in a bank file; validated into a
/// `Question` on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub topic: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(
            QuestionId::new(record.id),
            Topic::new(record.topic)?,
            record.prompt,
            record.options,
            record.correct_option,
            record.explanation,
        )
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.value(),
            topic: question.topic.as_str().to_string(),
            prompt: question.prompt,
            options: question.options,
            correct_option: question.correct_option,
            explanation: question.explanation,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
