use serde::{Deserialize, Serialize};

/// A recorded selection for one question position.
///
/// `Unanswered` is the reserved sentinel distinct from every valid option
/// index; on the wire it is `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum Answer {
    #[default]
    Unanswered,
    Selected(usize),
}

impl Answer {
    /// The selected option index, if any.
    #[must_use]
    pub fn selected(self) -> Option<usize> {
        match self {
            Answer::Unanswered => None,
            Answer::Selected(index) => Some(index),
        }
    }

    #[must_use]
    pub fn is_answered(self) -> bool {
        matches!(self, Answer::Selected(_))
    }
}

impl From<Option<usize>> for Answer {
    fn from(value: Option<usize>) -> Self {
        match value {
            None => Answer::Unanswered,
            Some(index) => Answer::Selected(index),
        }
    }
}

impl From<Answer> for Option<usize> {
    fn from(answer: Answer) -> Self {
        answer.selected()
    }
}
