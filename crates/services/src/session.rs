use chrono::{DateTime, Utc};

use quiz_core::model::{Answer, Question, TopicSet};
use quiz_core::score::{ScoreReport, score};

use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle stage of a quiz attempt. Transitions are strictly linear:
/// `NotStarted → InProgress → Completed`, each taken exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-memory quiz attempt for a single user.
///
/// Holds the shuffled question order (fixed for the session's lifetime), one
/// answer slot per question, the current position, and the tick-driven
/// elapsed time. Every mutating operation validates first and then applies,
/// so a failed call leaves the session unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    user_name: String,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    current: usize,
    elapsed_seconds: u64,
    phase: Phase,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a not-yet-started session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyUserName` if the name is empty after
    /// trimming and `SessionError::EmptyQuestionSet` for zero questions.
    pub fn new(
        user_name: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, SessionError> {
        let user_name = user_name.into().trim().to_string();
        if user_name.is_empty() {
            return Err(SessionError::EmptyUserName);
        }
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        let answers = vec![Answer::Unanswered; questions.len()];
        Ok(Self {
            user_name,
            questions,
            answers,
            current: 0,
            elapsed_seconds: 0,
            phase: Phase::NotStarted,
            started_at: None,
            completed_at: None,
        })
    }

    /// Transition `NotStarted → InProgress` and stamp the start time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` if the session left
    /// `NotStarted` before.
    pub fn begin(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.phase != Phase::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        self.phase = Phase::InProgress;
        self.started_at = Some(now);
        Ok(())
    }

    /// Validate inputs and start an attempt in one call.
    ///
    /// # Errors
    ///
    /// Same validation as [`QuizSession::new`].
    pub fn start(
        user_name: impl Into<String>,
        questions: Vec<Question>,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(user_name, questions)?;
        session.begin(now)?;
        Ok(session)
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            Phase::NotStarted => Err(SessionError::NotStarted),
            Phase::Completed => Err(SessionError::AlreadyCompleted),
        }
    }

    /// Record a selection for the question at the current position,
    /// overwriting any prior selection. Does not advance the position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OptionOutOfRange` for an invalid index and a
    /// phase error unless the session is in progress.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        let len = self.questions[self.current].options().len();
        if option_index >= len {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
                len,
            });
        }
        self.answers[self.current] = Answer::Selected(option_index);
        Ok(())
    }

    /// Jump to an arbitrary question position (backs the question
    /// navigator); the target may be answered or not.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PositionOutOfRange` outside `[0, N)` and a
    /// phase error unless the session is in progress.
    pub fn go_to(&mut self, position: usize) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if position >= self.questions.len() {
            return Err(SessionError::PositionOutOfRange {
                position,
                len: self.questions.len(),
            });
        }
        self.current = position;
        Ok(())
    }

    /// Advance one question; a no-op at the last question.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the session is in progress.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
        Ok(())
    }

    /// Step back one question; a no-op at the first question.
    ///
    /// # Errors
    ///
    /// Returns a phase error unless the session is in progress.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Add one second of elapsed time. Driven by an external one-second
    /// cadence; silently has no effect once the session is not in progress,
    /// so a late tick is harmless rather than an error.
    pub fn tick(&mut self) {
        if self.phase == Phase::InProgress {
            self.elapsed_seconds += 1;
        }
    }

    /// One-time terminal transition `InProgress → Completed`; freezes the
    /// answers and the clock. Partial submission is allowed — unanswered
    /// questions simply score as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyCompleted` on a second submit and
    /// `SessionError::NotStarted` before `begin`.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.phase = Phase::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    /// Compute the score report for a completed attempt. Pure and
    /// recomputable; the session itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` unless the session has been
    /// submitted.
    pub fn score(&self, topics: &TopicSet) -> Result<ScoreReport, SessionError> {
        if self.phase != Phase::Completed {
            return Err(SessionError::NotCompleted);
        }
        Ok(score(&self.questions, &self.answers, topics)?)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.phase == Phase::InProgress
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The shuffled question order, fixed for the session's lifetime.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// One entry per question position; `Answer::Unanswered` by default.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionId, Topic};
    use quiz_core::time::fixed_now;

    fn question(id: u32, correct_option: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            Topic::new("HTML").unwrap(),
            format!("prompt {id}"),
            vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_option,
            None,
        )
        .unwrap()
    }

    fn questions(n: u32) -> Vec<Question> {
        (1..=n).map(|id| question(id, 0)).collect()
    }

    fn started(n: u32) -> QuizSession {
        QuizSession::start("Ada", questions(n), fixed_now()).unwrap()
    }

    #[test]
    fn start_trims_user_name() {
        let session = QuizSession::start("  Ada  ", questions(2), fixed_now()).unwrap();
        assert_eq!(session.user_name(), "Ada");
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.started_at(), Some(fixed_now()));
    }

    #[test]
    fn blank_user_name_rejected() {
        let err = QuizSession::start("   ", questions(2), fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::EmptyUserName);
        assert!(!err.is_state_error());
    }

    #[test]
    fn empty_question_set_rejected() {
        let err = QuizSession::start("Ada", Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::EmptyQuestionSet);
    }

    #[test]
    fn new_session_is_not_started() {
        let session = QuizSession::new("Ada", questions(2)).unwrap();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.started_at(), None);
    }

    #[test]
    fn begin_twice_rejected() {
        let mut session = started(2);
        let err = session.begin(fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::AlreadyStarted);
    }

    #[test]
    fn operations_before_begin_rejected() {
        let mut session = QuizSession::new("Ada", questions(3)).unwrap();
        assert_eq!(session.select_answer(0), Err(SessionError::NotStarted));
        assert_eq!(session.go_to(1), Err(SessionError::NotStarted));
        assert_eq!(session.submit(fixed_now()), Err(SessionError::NotStarted));
        session.tick();
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn invariants_hold_after_every_operation() {
        let mut session = started(3);
        let checks = |s: &QuizSession| {
            assert_eq!(s.answers().len(), 3);
            assert!(s.current_position() < 3);
        };

        checks(&session);
        session.select_answer(1).unwrap();
        checks(&session);
        session.next().unwrap();
        checks(&session);
        session.go_to(2).unwrap();
        checks(&session);
        session.previous().unwrap();
        checks(&session);
        session.tick();
        checks(&session);
    }

    #[test]
    fn select_answer_records_without_advancing() {
        let mut session = started(3);
        session.select_answer(2).unwrap();
        assert_eq!(session.answers()[0], Answer::Selected(2));
        assert_eq!(session.current_position(), 0);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn reselecting_same_index_is_idempotent() {
        let mut session = started(3);
        session.select_answer(1).unwrap();
        let snapshot = session.answers().to_vec();
        session.select_answer(1).unwrap();
        assert_eq!(session.answers(), snapshot.as_slice());
    }

    #[test]
    fn selection_overwrites_prior_answer() {
        let mut session = started(3);
        session.select_answer(1).unwrap();
        session.select_answer(3).unwrap();
        assert_eq!(session.answers()[0], Answer::Selected(3));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn out_of_range_option_rejected() {
        let mut session = started(3);
        let err = session.select_answer(4).unwrap_err();
        assert_eq!(err, SessionError::OptionOutOfRange { index: 4, len: 4 });
        assert_eq!(session.answers()[0], Answer::Unanswered);
    }

    #[test]
    fn go_to_allows_arbitrary_jumps() {
        let mut session = started(5);
        session.go_to(4).unwrap();
        assert_eq!(session.current_position(), 4);
        session.go_to(1).unwrap();
        assert_eq!(session.current_position(), 1);
    }

    #[test]
    fn go_to_out_of_range_rejected() {
        let mut session = started(3);
        let err = session.go_to(3).unwrap_err();
        assert_eq!(err, SessionError::PositionOutOfRange { position: 3, len: 3 });
        assert_eq!(session.current_position(), 0);
    }

    #[test]
    fn next_and_previous_clamp_at_boundaries() {
        let mut session = started(2);
        session.previous().unwrap();
        assert_eq!(session.current_position(), 0);
        session.next().unwrap();
        assert_eq!(session.current_position(), 1);
        session.next().unwrap();
        assert_eq!(session.current_position(), 1);
    }

    #[test]
    fn tick_accumulates_while_in_progress() {
        let mut session = started(2);
        for _ in 0..42 {
            session.tick();
        }
        assert_eq!(session.elapsed_seconds(), 42);
    }

    #[test]
    fn submit_freezes_the_session() {
        let mut session = started(3);
        session.select_answer(0).unwrap();
        for _ in 0..5 {
            session.tick();
        }
        session.submit(fixed_now()).unwrap();

        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));
        assert_eq!(
            session.select_answer(1),
            Err(SessionError::AlreadyCompleted)
        );
        assert_eq!(session.go_to(1), Err(SessionError::AlreadyCompleted));
        assert_eq!(session.next(), Err(SessionError::AlreadyCompleted));

        // A late tick is a structural no-op, never an error.
        session.tick();
        assert_eq!(session.elapsed_seconds(), 5);
        assert_eq!(session.answers()[0], Answer::Selected(0));
    }

    #[test]
    fn double_submit_rejected() {
        let mut session = started(2);
        session.submit(fixed_now()).unwrap();
        let err = session.submit(fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::AlreadyCompleted);
        assert!(err.is_state_error());
    }

    #[test]
    fn partial_submission_is_allowed() {
        let mut session = started(3);
        session.select_answer(0).unwrap();
        session.submit(fixed_now()).unwrap();
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn score_requires_completion() {
        let topics = quiz_core::model::TopicSet::new(vec![Topic::new("HTML").unwrap()]).unwrap();
        let mut session = started(2);
        assert_eq!(session.score(&topics), Err(SessionError::NotCompleted));

        session.select_answer(0).unwrap();
        session.submit(fixed_now()).unwrap();
        let report = session.score(&topics).unwrap();
        assert_eq!(report.correct_count(), 1);
        assert_eq!(report.total_count(), 2);
        assert_eq!(report.percentage(), 50);
    }
}
