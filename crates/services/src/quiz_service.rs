use std::sync::Arc;

use quiz_core::model::{Question, TopicCatalog, TopicScope};
use quiz_core::QuizSession;
use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::QuestionRepository;
use tracing::{debug, info};

use crate::error::QuizServiceError;

/// Loads questions and starts quiz sessions.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    seed: Option<u64>,
}

impl QuizService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            questions,
            seed: None,
        }
    }

    /// Use a fixed shuffle seed so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Random source for the shuffle that opens `attempt`.
    ///
    /// Seeded services mix the attempt into the seed so each restart draws a
    /// fresh permutation while the whole sequence stays reproducible.
    fn attempt_rng(&self, attempt: u32) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ u64::from(attempt)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Fetch the raw question set for `scope`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the repository call fails.
    pub async fn load_questions(&self, scope: &TopicScope) -> Result<Vec<Question>, QuizServiceError> {
        let questions = match scope.topic() {
            Some(topic) => self.questions.get_questions_by_topic(topic).await?,
            None => self.questions.get_all_questions().await?,
        };
        debug!(scope = %scope, count = questions.len(), "loaded quiz questions");
        Ok(questions)
    }

    /// Start a session over freshly loaded questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Empty` if `scope` has no questions.
    /// Returns `QuizServiceError::Storage` if the repository call fails.
    pub async fn start_quiz(&self, scope: &TopicScope) -> Result<QuizSession, QuizServiceError> {
        let questions = self.load_questions(scope).await?;
        self.start_with(scope, &questions)
    }

    /// Start a session over an already loaded question set.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Empty` if `questions` is empty.
    pub fn start_with(
        &self,
        scope: &TopicScope,
        questions: &[Question],
    ) -> Result<QuizSession, QuizServiceError> {
        if questions.is_empty() {
            return Err(QuizServiceError::Empty);
        }
        let session = QuizSession::start(questions, &mut self.attempt_rng(0))?;
        info!(scope = %scope, total = session.total(), "quiz started");
        Ok(session)
    }

    /// Reshuffle and reset `session` for another attempt.
    pub fn restart(&self, session: &mut QuizSession) {
        let mut rng = self.attempt_rng(session.attempt().wrapping_add(1));
        session.restart(&mut rng);
        info!(attempt = session.attempt(), "quiz restarted");
    }

    /// Distinct topics and their question counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the repository call fails.
    pub async fn topic_catalog(&self) -> Result<TopicCatalog, QuizServiceError> {
        let questions = self.questions.get_all_questions().await?;
        Ok(TopicCatalog::from_questions(&questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use storage::InMemoryRepository;

    fn question(topic: &str, n: usize) -> Question {
        Question::new(topic, format!("{topic} {n}"), vec!["a".into(), "b".into()], "", 0).unwrap()
    }

    fn service() -> QuizService {
        let repo = InMemoryRepository::with_questions(
            vec![question("Kaki", 1), question("Kaki", 2), question("Tangan", 1)],
            fixed_clock(),
        );
        QuizService::new(Arc::new(repo)).with_seed(Some(7))
    }

    #[tokio::test]
    async fn scope_selects_questions() {
        let svc = service();
        let all = svc.load_questions(&TopicScope::All).await.unwrap();
        assert_eq!(all.len(), 3);
        let kaki = svc
            .load_questions(&TopicScope::Topic("Kaki".into()))
            .await
            .unwrap();
        assert_eq!(kaki.len(), 2);
    }

    #[tokio::test]
    async fn empty_topic_does_not_start() {
        let svc = service();
        let err = svc
            .start_quiz(&TopicScope::Topic("Telinga".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizServiceError::Empty));
    }

    #[tokio::test]
    async fn seeded_starts_are_reproducible() {
        let svc = service();
        let a = svc.start_quiz(&TopicScope::All).await.unwrap();
        let b = svc.start_quiz(&TopicScope::All).await.unwrap();
        assert_eq!(a.questions(), b.questions());
        assert_eq!(a.current_index(), 0);
    }

    #[tokio::test]
    async fn restart_bumps_attempt() {
        let svc = service();
        let mut session = svc.start_quiz(&TopicScope::All).await.unwrap();
        svc.restart(&mut session);
        assert_eq!(session.attempt(), 1);
        assert!(!session.is_finished());
    }

    fn bank_of(len: usize) -> QuizService {
        let questions = (0..len).map(|n| question("Kaki", n)).collect();
        let repo = InMemoryRepository::with_questions(questions, fixed_clock());
        QuizService::new(Arc::new(repo)).with_seed(Some(7))
    }

    fn order(session: &QuizSession) -> Vec<String> {
        session.questions().iter().map(|q| q.text().to_owned()).collect()
    }

    fn restart_orders(
        svc: &QuizService,
        session: &mut QuizSession,
        restarts: usize,
    ) -> Vec<Vec<String>> {
        let mut orders = vec![order(session)];
        for _ in 0..restarts {
            svc.restart(session);
            orders.push(order(session));
        }
        orders
    }

    #[tokio::test]
    async fn seeded_restarts_draw_fresh_orders() {
        let svc = bank_of(8);
        let mut session = svc.start_quiz(&TopicScope::All).await.unwrap();
        let orders = restart_orders(&svc, &mut session, 5);
        for (i, a) in orders.iter().enumerate() {
            for b in &orders[i + 1..] {
                assert_ne!(a, b, "restart repeated an earlier order");
            }
        }
    }

    #[tokio::test]
    async fn seeded_restart_sequence_is_reproducible() {
        let first = bank_of(8);
        let second = bank_of(8);
        let mut a = first.start_quiz(&TopicScope::All).await.unwrap();
        let mut b = second.start_quiz(&TopicScope::All).await.unwrap();
        assert_eq!(restart_orders(&first, &mut a, 3), restart_orders(&second, &mut b, 3));
    }

    #[tokio::test]
    async fn catalog_counts_topics() {
        let catalog = service().topic_catalog().await.unwrap();
        assert_eq!(catalog.total_questions(), 3);
        assert_eq!(catalog.count_for("Kaki"), 2);
    }
}
