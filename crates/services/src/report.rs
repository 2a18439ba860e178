//! Assembles the data handed to the external report renderer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use quiz_core::model::{Answer, Question, Topic};
use quiz_core::score::{ScoreReport, TopicStat};

use crate::error::SessionError;
use crate::session::QuizSession;

//
// ─── PAYLOAD ───────────────────────────────────────────────────────────────────
//

/// One line of the report's question-review section: a question paired with
/// the recorded answer and whether it was correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerReview {
    pub question: Question,
    pub answer: Answer,
    pub is_correct: bool,
}

/// Everything the external report renderer needs for one completed attempt.
///
/// This is the entire handoff boundary: the renderer reads this payload and
/// never reaches back into the session. Unanswered entries serialize as
/// `null`; a topic with `total = 0` carries no percentage and must be
/// rendered as not applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPayload {
    pub user_name: String,
    /// Overall percentage in `[0, 100]`, rounded half-up.
    pub score: u8,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub time_spent_seconds: u64,
    pub generated_at: DateTime<Utc>,
    /// Questions in the order they were presented.
    pub questions: Vec<Question>,
    /// Same length and order as `questions`.
    pub answers: Vec<Answer>,
    pub topic_stats: BTreeMap<Topic, TopicStat>,
}

impl ReportPayload {
    /// Pair each question with the recorded answer and correctness flag.
    #[must_use]
    pub fn review(&self) -> Vec<AnswerReview> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| AnswerReview {
                question: question.clone(),
                answer: *answer,
                is_correct: question.is_correct(*answer),
            })
            .collect()
    }

    /// Percentage for one topic, or `None` when the topic had no questions
    /// (or is unknown). Never divides by zero.
    #[must_use]
    pub fn topic_percentage(&self, topic: &Topic) -> Option<u8> {
        self.topic_stats.get(topic).and_then(TopicStat::percentage)
    }

    /// Elapsed time as `m:ss` for report headers.
    #[must_use]
    pub fn time_spent_display(&self) -> String {
        let minutes = self.time_spent_seconds / 60;
        let seconds = self.time_spent_seconds % 60;
        format!("{minutes}:{seconds:02}")
    }
}

//
// ─── ASSEMBLY ──────────────────────────────────────────────────────────────────
//

/// Build the renderer payload from a completed session and its score
/// report. Pure transformation; performs no I/O.
///
/// # Errors
///
/// Returns `SessionError::NotCompleted` if the session has not been
/// submitted.
pub fn assemble(
    session: &QuizSession,
    report: &ScoreReport,
    generated_at: DateTime<Utc>,
) -> Result<ReportPayload, SessionError> {
    if !session.is_complete() {
        return Err(SessionError::NotCompleted);
    }

    Ok(ReportPayload {
        user_name: session.user_name().to_string(),
        score: report.percentage(),
        correct_answers: report.correct_count(),
        total_questions: report.total_count(),
        time_spent_seconds: session.elapsed_seconds(),
        generated_at,
        questions: session.questions().to_vec(),
        answers: session.answers().to_vec(),
        topic_stats: report.per_topic().clone(),
    })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
