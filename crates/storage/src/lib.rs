pub mod http;
pub mod question_bank;
pub mod repository;

pub use http::{HttpConfig, HttpRepository};
pub use repository::{
    InMemoryRepository, QuestionRepository, ResultRepository, Storage, StorageError,
};

impl Storage {
    /// Storage backed by the remote quiz backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn http(config: HttpConfig) -> Result<Self, StorageError> {
        Ok(Self::from_repo(HttpRepository::new(config)?))
    }
}
