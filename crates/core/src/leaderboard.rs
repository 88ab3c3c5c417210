//! Ranking and aggregate statistics over submitted results.
//!
//! Inputs are expected to be sorted by descending percentage already; nothing
//! here reorders them.

use crate::model::QuizResult;
use crate::scoring::{PASS_PERCENTAGE, round_percentage};

/// Aggregate figures shown above the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaderboardStats {
    pub participants: usize,
    pub top_percentage: u32,
    pub average_percentage: u32,
    pub pass_count: usize,
}

impl LeaderboardStats {
    #[must_use]
    pub fn from_sorted(results: &[QuizResult]) -> Self {
        let Some(first) = results.first() else {
            return Self::default();
        };

        let sum: f64 = results.iter().map(QuizResult::percentage).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / results.len() as f64;
        let pass_count = results
            .iter()
            .filter(|result| result.percentage() >= PASS_PERCENTAGE)
            .count();

        Self {
            participants: results.len(),
            top_percentage: round_percentage(first.percentage()),
            average_percentage: round_percentage(mean),
            pass_count,
        }
    }
}

/// Distinguishing badge for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
}

impl RankBadge {
    #[must_use]
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Gold => "🏆",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }

    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// Colour band of the percentage pill in the leaderboard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentageBand {
    Pass,
    Borderline,
    Fail,
}

impl PercentageBand {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= PASS_PERCENTAGE {
            Self::Pass
        } else if percentage >= 50.0 {
            Self::Borderline
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Borderline => "borderline",
            Self::Fail => "fail",
        }
    }
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub rank: usize,
    pub badge: Option<RankBadge>,
    pub result: QuizResult,
}

/// Ranked results plus their statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leaderboard {
    entries: Vec<RankedResult>,
    stats: LeaderboardStats,
}

impl Leaderboard {
    /// Rank results by their position. `results` must already be sorted.
    #[must_use]
    pub fn from_sorted(results: Vec<QuizResult>) -> Self {
        let stats = LeaderboardStats::from_sorted(&results);
        let entries = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| {
                let rank = index + 1;
                RankedResult {
                    rank,
                    badge: RankBadge::for_rank(rank),
                    result,
                }
            })
            .collect();
        Self { entries, stats }
    }

    #[must_use]
    pub fn entries(&self) -> &[RankedResult] {
        &self.entries
    }

    #[must_use]
    pub fn stats(&self) -> LeaderboardStats {
        self.stats
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
