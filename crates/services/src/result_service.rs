use std::sync::Arc;

use chrono::NaiveDate;
use quiz_core::model::{NewResult, ResultError, TopicScope};
use quiz_core::QuizSession;
use storage::repository::ResultRepository;
use tracing::{info, warn};

use crate::error::SubmissionError;
use crate::Clock;

/// Who is taking the quiz, captured before the first question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    date: NaiveDate,
}

impl Participant {
    /// # Errors
    ///
    /// Returns `ResultError::EmptyName` when the trimmed name is blank.
    pub fn new(name: impl AsRef<str>, date: NaiveDate) -> Result<Self, ResultError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ResultError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            date,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Turns finished sessions into submitted results.
#[derive(Clone)]
pub struct ResultService {
    clock: Clock,
    results: Arc<dyn ResultRepository>,
}

impl ResultService {
    #[must_use]
    pub fn new(clock: Clock, results: Arc<dyn ResultRepository>) -> Self {
        Self { clock, results }
    }

    /// Date pre-filled in the participant form.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Build the result a finished session would submit.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::NotFinished` while the session is in progress.
    /// Returns `SubmissionError::Invalid` if the result fails validation.
    pub fn draft(
        &self,
        participant: &Participant,
        scope: &TopicScope,
        session: &QuizSession,
    ) -> Result<NewResult, SubmissionError> {
        if !session.is_finished() {
            return Err(SubmissionError::NotFinished);
        }
        let result = NewResult::from_score(
            participant.name(),
            participant.date(),
            scope.label(),
            session.score(),
        )?;
        Ok(result)
    }

    /// Submit the outcome of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::NotFinished` while the session is in progress.
    /// Returns `SubmissionError::Invalid` if the result fails validation.
    /// Returns `SubmissionError::Storage` if the repository rejects it.
    pub async fn submit(
        &self,
        participant: &Participant,
        scope: &TopicScope,
        session: &QuizSession,
    ) -> Result<NewResult, SubmissionError> {
        let result = self.draft(participant, scope, session)?;
        if let Err(err) = self.results.submit_result(&result).await {
            warn!(error = %err, "result submission failed");
            return Err(err.into());
        }
        info!(
            topic = result.topic(),
            score = result.score(),
            total = result.total(),
            "result submitted"
        );
        Ok(result)
    }
}
