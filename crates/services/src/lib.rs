#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod leaderboard_service;
pub mod loading;
pub mod quiz_service;
pub mod result_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, LeaderboardError, QuizServiceError, SubmissionError};
pub use leaderboard_service::{LeaderboardService, sort_for_ranking};
pub use loading::{LoadGuard, LoadTicket};
pub use quiz_service::QuizService;
pub use result_service::{Participant, ResultService};
