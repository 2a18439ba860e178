mod answer;
mod bank;
mod ids;
mod question;
mod topic;

pub use answer::Answer;
pub use bank::{BankError, BankRecord, QuestionBank};
pub use ids::{ParseIdError, QuestionId};
pub use question::{Question, QuestionError, QuestionRecord};
pub use topic::{Topic, TopicError, TopicSet};
