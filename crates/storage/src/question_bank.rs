use std::path::Path;

use quiz_core::model::Question;
use thiserror::Error;
use tracing::info;

static BUILTIN_BANK: &str = include_str!("../data/questions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question {index} is invalid: {source}")]
    Invalid {
        index: usize,
        source: quiz_core::model::QuestionError,
    },
}

/// Parse a JSON array of questions and validate each one.
///
/// # Errors
///
/// Returns `QuestionBankError` if the JSON is malformed or a question fails validation.
pub fn from_json_str(raw: &str) -> Result<Vec<Question>, QuestionBankError> {
    let questions: Vec<Question> = serde_json::from_str(raw)?;
    questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            q.validated()
                .map_err(|source| QuestionBankError::Invalid { index, source })
        })
        .collect()
}

/// Load a question bank from a JSON file.
///
/// # Errors
///
/// Returns `QuestionBankError` if the file cannot be read or parsed.
pub fn from_path(path: &Path) -> Result<Vec<Question>, QuestionBankError> {
    let raw = std::fs::read_to_string(path)?;
    let questions = from_json_str(&raw)?;
    info!(path = %path.display(), count = questions.len(), "loaded question bank");
    Ok(questions)
}

/// The question bank shipped with the application.
///
/// # Errors
///
/// Returns `QuestionBankError` if the bundled data is invalid.
pub fn builtin() -> Result<Vec<Question>, QuestionBankError> {
    from_json_str(BUILTIN_BANK)
}
