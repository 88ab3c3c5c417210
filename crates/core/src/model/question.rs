use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_ANSWERS: usize = 2;

/// A single multiple-choice question as served by the question repository.
///
/// Questions are immutable once constructed; sessions hold read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    topic: String,
    text: String,
    answers: Vec<String>,
    explanation: String,
    correct_answer_index: usize,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the topic or text is blank, fewer than
    /// [`MIN_ANSWERS`] options are given, or the correct index is out of range.
    pub fn new(
        topic: impl Into<String>,
        text: impl Into<String>,
        answers: Vec<String>,
        explanation: impl Into<String>,
        correct_answer_index: usize,
    ) -> Result<Self, QuestionError> {
        let topic = topic.into();
        let text = text.into();

        if topic.trim().is_empty() {
            return Err(QuestionError::EmptyTopic);
        }
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if answers.len() < MIN_ANSWERS {
            return Err(QuestionError::TooFewAnswers { len: answers.len() });
        }
        if correct_answer_index >= answers.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_answer_index,
                len: answers.len(),
            });
        }

        Ok(Self {
            topic,
            text,
            answers,
            explanation: explanation.into(),
            correct_answer_index,
        })
    }

    /// Re-run validation on a value that bypassed `new` (e.g. deserialized).
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Question::new`].
    pub fn validated(self) -> Result<Self, QuestionError> {
        Self::new(
            self.topic,
            self.text,
            self.answers,
            self.explanation,
            self.correct_answer_index,
        )
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Text of the option at `index`, if it exists.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_answer_index]
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer_index
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question topic cannot be empty")]
    EmptyTopic,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least {MIN_ANSWERS} answers, got {len}")]
    TooFewAnswers { len: usize },

    #[error("correct answer index {index} is out of range for {len} answers")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
