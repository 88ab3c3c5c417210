use thiserror::Error;

use crate::model::{QuestionError, ResultError};
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
