use std::cmp::Ordering;
use std::sync::Arc;

use quiz_core::Leaderboard;
use quiz_core::model::QuizResult;
use storage::repository::ResultRepository;
use tracing::debug;

use crate::error::LeaderboardError;

/// Fetches submitted results and ranks them for the admin view.
#[derive(Clone)]
pub struct LeaderboardService {
    results: Arc<dyn ResultRepository>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// Fetch all results, best first.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError::Storage` if the repository call fails.
    pub async fn leaderboard(&self) -> Result<Leaderboard, LeaderboardError> {
        let mut results = self.results.get_results().await?;
        sort_for_ranking(&mut results);
        debug!(count = results.len(), "ranked results");
        Ok(Leaderboard::from_sorted(results))
    }
}

/// Highest percentage first; equal percentages keep the earlier submission ahead.
pub fn sort_for_ranking(results: &mut [QuizResult]) {
    results.sort_by(|a, b| {
        b.percentage()
            .partial_cmp(&a.percentage())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.timestamp().cmp(&b.timestamp()))
    });
}
