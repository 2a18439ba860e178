//! Pure scoring over a completed attempt's answers.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{Answer, Question, Topic, TopicSet};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("cannot score an empty question set")]
    EmptyQuestionSet,

    #[error("answer count ({answers}) does not match question count ({questions})")]
    LengthMismatch { questions: usize, answers: usize },
}

//
// ─── PER-TOPIC STATS ───────────────────────────────────────────────────────────
//

/// Correct/total counts for one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TopicStat {
    pub correct: u32,
    pub total: u32,
}

impl TopicStat {
    /// Percentage correct, rounded half-up, or `None` when the topic has no
    /// questions. Callers must treat `None` as "not applicable" rather than
    /// computing a ratio themselves.
    #[must_use]
    pub fn percentage(&self) -> Option<u8> {
        if self.total == 0 {
            None
        } else {
            Some(percent_round_half_up(self.correct, self.total))
        }
    }
}

//
// ─── SCORE REPORT ──────────────────────────────────────────────────────────────
//

/// Aggregate result of one completed attempt. Derived on demand; never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    correct_count: u32,
    total_count: u32,
    percentage: u8,
    per_topic: BTreeMap<Topic, TopicStat>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Overall percentage in `[0, 100]`, rounded half-up.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn per_topic(&self) -> &BTreeMap<Topic, TopicStat> {
        &self.per_topic
    }

    #[must_use]
    pub fn topic_stat(&self, topic: &Topic) -> Option<TopicStat> {
        self.per_topic.get(topic).copied()
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Score an attempt: position `i` is correct iff `answers[i]` selects
/// `questions[i]`'s correct option. The unanswered sentinel never matches,
/// so unanswered positions count as incorrect.
///
/// Per-topic stats are seeded from the configured `topics`, so a topic with
/// no questions in this set still appears with `total = 0`.
///
/// # Errors
///
/// Returns `ScoreError::EmptyQuestionSet` for zero questions and
/// `ScoreError::LengthMismatch` when the slices disagree in length.
pub fn score(
    questions: &[Question],
    answers: &[Answer],
    topics: &TopicSet,
) -> Result<ScoreReport, ScoreError> {
    if questions.is_empty() {
        return Err(ScoreError::EmptyQuestionSet);
    }
    if answers.len() != questions.len() {
        return Err(ScoreError::LengthMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    let mut per_topic: BTreeMap<Topic, TopicStat> = topics
        .iter()
        .map(|topic| (topic.clone(), TopicStat::default()))
        .collect();

    let mut correct_count = 0_u32;
    for (question, answer) in questions.iter().zip(answers) {
        let stat = per_topic.entry(question.topic().clone()).or_default();
        stat.total += 1;
        if question.is_correct(*answer) {
            stat.correct += 1;
            correct_count += 1;
        }
    }

    let total_count = u32::try_from(questions.len()).unwrap_or(u32::MAX);

    Ok(ScoreReport {
        correct_count,
        total_count,
        percentage: percent_round_half_up(correct_count, total_count),
        per_topic,
    })
}

/// `round(100 * correct / total)` with exact integer round-half-up
/// semantics; `total` must be non-zero.
fn percent_round_half_up(correct: u32, total: u32) -> u8 {
    let correct = u64::from(correct);
    let total = u64::from(total);
    u8::try_from((200 * correct + total) / (2 * total)).unwrap_or(100)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
