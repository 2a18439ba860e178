use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("duplicate topic: {0}")]
    Duplicate(String),

    #[error("topic set cannot be empty")]
    EmptySet,
}

/// Validated topic tag (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    /// Create a validated topic tag.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TopicError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Topic {
    type Error = TopicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Topic::new(value)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

/// The closed set of topics configured alongside a question bank.
///
/// Topics in the set may have zero questions in a given bank; grouped
/// scoring still reports them (with `total = 0`) so the report layer can
/// render them as not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSet(Vec<Topic>);

impl TopicSet {
    /// Build a topic set, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::EmptySet` for an empty list and
    /// `TopicError::Duplicate` when a tag appears twice.
    pub fn new(topics: Vec<Topic>) -> Result<Self, TopicError> {
        if topics.is_empty() {
            return Err(TopicError::EmptySet);
        }
        for (i, topic) in topics.iter().enumerate() {
            if topics[..i].contains(topic) {
                return Err(TopicError::Duplicate(topic.as_str().to_string()));
            }
        }
        Ok(Self(topics))
    }

    #[must_use]
    pub fn contains(&self, topic: &Topic) -> bool {
        self.0.contains(topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
