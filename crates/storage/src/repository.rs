use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::model::{NewResult, Question, QuizResult};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by repository backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Records that decode but break domain invariants are treated as bad payloads.
impl From<quiz_core::Error> for StorageError {
    fn from(err: quiz_core::Error) -> Self {
        StorageError::Serialization(format!("invalid record: {err}"))
    }
}

/// Read side of the question service.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Fetch every question in the bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or decoded.
    async fn get_all_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// Fetch questions filed under `topic` (exact match).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or decoded.
    async fn get_questions_by_topic(&self, topic: &str) -> Result<Vec<Question>, StorageError>;

    /// Fetch the question at `index` in bank order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the index is past the end.
    async fn get_question(&self, index: usize) -> Result<Question, StorageError>;

    /// Fetch the question whose text equals `text`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no question matches.
    async fn get_question_by_text(&self, text: &str) -> Result<Question, StorageError>;
}

/// Submitted quiz results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Fetch all submitted results. Ordering is backend-defined.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or decoded.
    async fn get_results(&self) -> Result<Vec<QuizResult>, StorageError>;

    /// Store a new result; the backend assigns its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn submit_result(&self, result: &NewResult) -> Result<(), StorageError>;
}

/// Simple in-memory backend for offline use, testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    clock: Clock,
    questions: Arc<Mutex<Vec<Question>>>,
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_questions(Vec::new(), Clock::default_clock())
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>, clock: Clock) -> Self {
        Self {
            clock,
            questions: Arc::new(Mutex::new(questions)),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Insert an already-timestamped result, bypassing the clock.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_result(&self, result: QuizResult) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(result);
        Ok(())
    }

    fn read_questions<T>(&self, f: impl FnOnce(&[Question]) -> T) -> Result<T, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(f(&guard))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn get_all_questions(&self) -> Result<Vec<Question>, StorageError> {
        self.read_questions(<[Question]>::to_vec)
    }

    async fn get_questions_by_topic(&self, topic: &str) -> Result<Vec<Question>, StorageError> {
        self.read_questions(|questions| {
            questions
                .iter()
                .filter(|q| q.topic() == topic)
                .cloned()
                .collect()
        })
    }

    async fn get_question(&self, index: usize) -> Result<Question, StorageError> {
        self.read_questions(|questions| questions.get(index).cloned())?
            .ok_or(StorageError::NotFound)
    }

    async fn get_question_by_text(&self, text: &str) -> Result<Question, StorageError> {
        self.read_questions(|questions| questions.iter().find(|q| q.text() == text).cloned())?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn get_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn submit_result(&self, result: &NewResult) -> Result<(), StorageError> {
        let stored = result.clone().into_result(self.clock.now());
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(stored);
        debug!(count = guard.len(), "stored quiz result in memory");
        Ok(())
    }
}

/// Aggregates question and result repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory_with(questions: Vec<Question>, clock: Clock) -> Self {
        Self::from_repo(InMemoryRepository::with_questions(questions, clock))
    }

    #[must_use]
    pub fn from_repo<R>(repo: R) -> Self
    where
        R: QuestionRepository + ResultRepository + Clone + 'static,
    {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultRepository> = Arc::new(repo);
        Self { questions, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn question(topic: &str, text: &str) -> Question {
        Question::new(topic, text, vec!["a".into(), "b".into()], "", 1).unwrap()
    }

    fn repo() -> InMemoryRepository {
        InMemoryRepository::with_questions(
            vec![
                question("Kaki", "Q1"),
                question("Tangan", "Q2"),
                question("Kaki", "Q3"),
            ],
            fixed_clock(),
        )
    }

    #[tokio::test]
    async fn filters_by_topic() {
        let repo = repo();
        let kaki = repo.get_questions_by_topic("Kaki").await.unwrap();
        assert_eq!(kaki.len(), 2);
        assert!(repo.get_questions_by_topic("Telinga").await.unwrap().is_empty());
        assert_eq!(repo.get_all_questions().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn point_lookups_report_not_found() {
        let repo = repo();
        assert_eq!(repo.get_question(1).await.unwrap().text(), "Q2");
        assert!(matches!(repo.get_question(9).await, Err(StorageError::NotFound)));
        assert_eq!(repo.get_question_by_text("Q3").await.unwrap().topic(), "Kaki");
        assert!(matches!(
            repo.get_question_by_text("nope").await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn submitted_results_get_clock_timestamp() {
        let repo = repo();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let draft = NewResult::new("Siti", date, "Kaki", 1, 2, 50.0).unwrap();
        repo.submit_result(&draft).await.unwrap();

        let results = repo.get_results().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Siti");
        assert_eq!(results[0].timestamp(), fixed_now());
    }

    #[tokio::test]
    async fn storage_shares_one_backend() {
        let storage = Storage::in_memory_with(vec![question("Kaki", "Q1")], fixed_clock());
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let draft = NewResult::new("Ali", date, "Kaki", 1, 1, 100.0).unwrap();
        storage.results.submit_result(&draft).await.unwrap();
        assert_eq!(storage.results.get_results().await.unwrap().len(), 1);
        assert_eq!(storage.questions.get_all_questions().await.unwrap().len(), 1);
    }
}
