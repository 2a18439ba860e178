#![forbid(unsafe_code)]

pub mod error;
pub mod report;
pub mod session;
pub mod session_loop;
pub mod shuffle;
pub mod ticker;

pub use quiz_core::time::Clock;

pub use error::SessionError;
pub use report::{AnswerReview, ReportPayload, assemble};
pub use session::{Phase, QuizSession};
pub use session_loop::QuizLoopService;
pub use shuffle::{shuffled, shuffled_with};
pub use ticker::SessionTicker;
