use std::path::Path;
use std::sync::Arc;

use storage::question_bank;
use storage::{HttpConfig, Storage};
use tracing::info;

use crate::Clock;
use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::quiz_service::QuizService;
use crate::result_service::ResultService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    results: Arc<ResultService>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, seed: Option<u64>) -> Self {
        let quiz = Arc::new(QuizService::new(Arc::clone(&storage.questions)).with_seed(seed));
        let results = Arc::new(ResultService::new(clock, Arc::clone(&storage.results)));
        let leaderboard = Arc::new(LeaderboardService::new(Arc::clone(&storage.results)));
        Self {
            quiz,
            results,
            leaderboard,
        }
    }

    /// Build services backed by the remote quiz backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the HTTP client cannot be built.
    pub fn new_http(
        config: HttpConfig,
        clock: Clock,
        seed: Option<u64>,
    ) -> Result<Self, AppServicesError> {
        info!(base_url = %config.base_url, "using remote quiz backend");
        let storage = Storage::http(config)?;
        Ok(Self::from_storage(&storage, clock, seed))
    }

    /// Build offline services over a question bank file, or the bundled bank when `bank` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::QuestionBank` if the bank cannot be loaded.
    pub fn new_offline(
        bank: Option<&Path>,
        clock: Clock,
        seed: Option<u64>,
    ) -> Result<Self, AppServicesError> {
        let questions = match bank {
            Some(path) => question_bank::from_path(path)?,
            None => question_bank::builtin()?,
        };
        info!(count = questions.len(), "using offline question bank");
        let storage = Storage::in_memory_with(questions, clock);
        Ok(Self::from_storage(&storage, clock, seed))
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }
}
