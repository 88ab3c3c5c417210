#![forbid(unsafe_code)]

pub mod answers;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod time;

pub use answers::AnswerSheet;
pub use error::Error;
pub use leaderboard::{Leaderboard, LeaderboardStats, PercentageBand, RankBadge, RankedResult};
pub use model::{TopicCatalog, TopicScope, TopicSummary};
pub use scoring::{PerformanceTier, QuestionReview, QuizScore, percentage, round_percentage, score};
pub use session::{Advance, AnswerOutcome, QuizSession, SessionError, SessionState};
pub use shuffle::shuffled;
pub use time::Clock;
