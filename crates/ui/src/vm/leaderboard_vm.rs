use chrono::NaiveDate;
use quiz_core::model::QuizResult;
use quiz_core::{Leaderboard, PercentageBand, RankedResult, round_percentage};

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub participants: usize,
    pub top_percentage: u32,
    pub average_percentage: u32,
    pub pass_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub badge_icon: Option<&'static str>,
    pub badge_css: &'static str,
    pub name: String,
    pub date: String,
    pub topic: String,
    pub score_label: String,
    pub percentage: u32,
    pub band_css: &'static str,
    pub print: PrintCardVm,
}

/// Printable result sheet for one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintCardVm {
    pub name: String,
    pub date: String,
    pub topic: String,
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
    pub percentage: u32,
    pub tier_label: &'static str,
}

impl PrintCardVm {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            name: result.name().to_owned(),
            date: format_date(result.date()),
            topic: result.topic().to_owned(),
            correct: result.score(),
            wrong: result.wrong(),
            total: result.total(),
            percentage: round_percentage(result.percentage()),
            tier_label: result.tier().label(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardVm {
    pub stats: StatsVm,
    pub rows: Vec<LeaderboardRowVm>,
}

impl LeaderboardVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn map_row(entry: &RankedResult) -> LeaderboardRowVm {
    let result = &entry.result;
    LeaderboardRowVm {
        rank: entry.rank,
        badge_icon: entry.badge.map(|badge| badge.icon()),
        badge_css: entry.badge.map_or("plain", |badge| badge.css_modifier()),
        name: result.name().to_owned(),
        date: format_date(result.date()),
        topic: result.topic().to_owned(),
        score_label: format!("{}/{}", result.score(), result.total()),
        percentage: round_percentage(result.percentage()),
        band_css: PercentageBand::from_percentage(result.percentage()).css_modifier(),
        print: PrintCardVm::from_result(result),
    }
}

#[must_use]
pub fn map_leaderboard(board: &Leaderboard) -> LeaderboardVm {
    let stats = board.stats();
    LeaderboardVm {
        stats: StatsVm {
            participants: stats.participants,
            top_percentage: stats.top_percentage,
            average_percentage: stats.average_percentage,
            pass_count: stats.pass_count,
        },
        rows: board.entries().iter().map(map_row).collect(),
    }
}

/// Heading date on the print sheet.
#[must_use]
pub fn print_date_label(today: NaiveDate) -> String {
    format!("Tarikh Cetak: {}", format_date(today))
}
