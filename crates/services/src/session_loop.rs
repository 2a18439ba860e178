//! Orchestrates one attempt from shuffle to renderer payload.

use std::sync::Arc;

use tokio::sync::Mutex;

use quiz_core::model::QuestionBank;
use quiz_core::time::Clock;

use crate::error::SessionError;
use crate::report::{ReportPayload, assemble};
use crate::session::QuizSession;
use crate::shuffle::shuffled;
use crate::ticker::SessionTicker;

/// Runs quiz attempts against one question bank.
///
/// Owns the time source and the bank; each attempt gets its own shuffled
/// question order. Restarting is just another `start_attempt` — the previous
/// session and its ticker are dropped by the caller.
#[derive(Debug, Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: QuestionBank,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, bank: QuestionBank) -> Self {
        Self { clock, bank }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Shuffle the bank and start a new attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyUserName` for a blank name; the bank is
    /// validated non-empty at construction, so the question set never is.
    pub fn start_attempt(&self, user_name: &str) -> Result<QuizSession, SessionError> {
        let questions = shuffled(self.bank.questions());
        QuizSession::start(user_name, questions, self.clock.now())
    }

    /// Spawn the once-per-second ticker for a running session.
    #[must_use]
    pub fn spawn_ticker(&self, session: &Arc<Mutex<QuizSession>>) -> SessionTicker {
        SessionTicker::spawn(Arc::clone(session))
    }

    /// Submit the session and assemble the renderer payload.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyCompleted` on a second submit and
    /// propagates scoring failures.
    pub fn finish_attempt(&self, session: &mut QuizSession) -> Result<ReportPayload, SessionError> {
        session.submit(self.clock.now())?;
        let report = session.score(self.bank.topics())?;
        assemble(session, &report, self.clock.now())
    }
}
