use std::sync::Arc;

use services::{AppServices, LeaderboardService, QuizService, ResultService};

pub trait UiApp: Send + Sync {
    fn quiz(&self) -> Arc<QuizService>;
    fn results(&self) -> Arc<ResultService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
}

impl UiApp for AppServices {
    fn quiz(&self) -> Arc<QuizService> {
        AppServices::quiz(self)
    }

    fn results(&self) -> Arc<ResultService> {
        AppServices::results(self)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        AppServices::leaderboard(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz: Arc<QuizService>,
    results: Arc<ResultService>,
    leaderboard: Arc<LeaderboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz(),
            results: app.results(),
            leaderboard: app.leaderboard(),
        }
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

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
