//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use quiz_core::model::ResultError;
use storage::question_bank::QuestionBankError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("no questions available for this quiz")]
    Empty,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("quiz is not finished yet")]
    NotFinished,
    #[error(transparent)]
    Invalid(#[from] ResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
