use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::scoring::{PerformanceTier, QuizScore};

//
// ─── NEW RESULT ────────────────────────────────────────────────────────────────
//

/// A completed quiz attempt ready to be submitted to the result repository.
///
/// The repository assigns the creation timestamp; everything else is fixed here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResult {
    name: String,
    date: NaiveDate,
    topic: String,
    score: u32,
    total: u32,
    percentage: f64,
}

impl NewResult {
    /// Build a validated submission. The participant name is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when the name is blank, `total` is zero,
    /// `score` exceeds `total`, or `percentage` is outside `[0, 100]`.
    pub fn new(
        name: impl AsRef<str>,
        date: NaiveDate,
        topic: impl Into<String>,
        score: u32,
        total: u32,
        percentage: f64,
    ) -> Result<Self, ResultError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ResultError::EmptyName);
        }
        if total == 0 {
            return Err(ResultError::ZeroTotal);
        }
        if score > total {
            return Err(ResultError::ScoreExceedsTotal { score, total });
        }
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(ResultError::InvalidPercentage(percentage));
        }

        Ok(Self {
            name: name.to_owned(),
            date,
            topic: topic.into(),
            score,
            total,
            percentage,
        })
    }

    /// Build a submission from a computed quiz score.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` for a blank name or an empty quiz.
    pub fn from_score(
        name: impl AsRef<str>,
        date: NaiveDate,
        topic: impl Into<String>,
        score: QuizScore,
    ) -> Result<Self, ResultError> {
        Self::new(
            name,
            date,
            topic,
            score.correct(),
            score.total(),
            f64::from(score.percentage()),
        )
    }

    /// Attach the repository-assigned timestamp.
    #[must_use]
    pub fn into_result(self, timestamp: DateTime<Utc>) -> QuizResult {
        QuizResult {
            name: self.name,
            date: self.date,
            topic: self.topic,
            score: self.score,
            total: self.total,
            percentage: self.percentage,
            timestamp,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

//
// ─── STORED RESULT ─────────────────────────────────────────────────────────────
//

/// A submitted result as returned by the result repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    name: String,
    date: NaiveDate,
    topic: String,
    score: u32,
    total: u32,
    percentage: f64,
    timestamp: DateTime<Utc>,
}

impl QuizResult {
    /// Rehydrate a result from the repository.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` if the persisted values violate the result invariants.
    pub fn from_persisted(
        name: String,
        date: NaiveDate,
        topic: String,
        score: u32,
        total: u32,
        percentage: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ResultError> {
        Ok(NewResult::new(name, date, topic, score, total, percentage)?.into_result(timestamp))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Number of questions answered incorrectly or skipped.
    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }

    #[must_use]
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(self.percentage)
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("participant name cannot be empty")]
    EmptyName,

    #[error("result total must be greater than zero")]
    ZeroTotal,

    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("percentage must be within 0..=100, got {0}")]
    InvalidPercentage(f64),
}
