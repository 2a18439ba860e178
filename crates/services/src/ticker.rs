//! Wall-clock cadence for a running session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::QuizSession;

/// Drives `QuizSession::tick` once per second while the session is in
/// progress.
///
/// The underlying task exits on its own once the session leaves the
/// in-progress phase, and is aborted when the ticker is cancelled or
/// dropped — a discarded session never keeps accumulating time.
#[derive(Debug)]
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Spawn a once-per-second ticker for the given session.
    #[must_use]
    pub fn spawn(session: Arc<Mutex<QuizSession>>) -> Self {
        Self::spawn_with_period(session, Duration::from_secs(1))
    }

    /// Spawn a ticker with a custom period. Each elapsed period still adds
    /// exactly one second to the session.
    #[must_use]
    pub fn spawn_with_period(session: Arc<Mutex<QuizSession>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; skip it so the session
            // clock starts at zero.
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut session = session.lock().await;
                if !session.is_in_progress() {
                    break;
                }
                session.tick();
            }
        });
        Self { handle }
    }

    /// Stop delivering ticks. Dropping the ticker has the same effect.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the driving task has exited (completed or aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
