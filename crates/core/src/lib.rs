#![forbid(unsafe_code)]

pub mod model;
pub mod score;
pub mod time;

pub use model::{
    Answer, BankError, Question, QuestionBank, QuestionError, QuestionId, QuestionRecord, Topic,
    TopicError, TopicSet,
};
pub use score::{ScoreError, ScoreReport, TopicStat, score};
pub use time::Clock;
