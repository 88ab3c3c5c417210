use quiz_core::{PerformanceTier, QuizSession};

/// Placeholder for a question left unanswered.
pub const NO_ANSWER: &str = "Tiada jawapan";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewLineVm {
    pub number: usize,
    pub question: String,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
    pub percentage: u32,
    pub stars: u8,
    pub label: &'static str,
    pub message: &'static str,
    pub tier_css: &'static str,
    pub lines: Vec<ReviewLineVm>,
}

impl SummaryVm {
    /// Star slots with their fill state, always three.
    #[must_use]
    pub fn star_slots(&self) -> [bool; 3] {
        [self.stars > 0, self.stars > 1, self.stars > 2]
    }
}

#[must_use]
pub fn map_summary(session: &QuizSession) -> SummaryVm {
    let score = session.score();
    let tier: PerformanceTier = score.tier();
    let lines = session
        .breakdown()
        .into_iter()
        .map(|line| ReviewLineVm {
            number: line.number,
            question: line.question.text().to_owned(),
            selected: line.selected_text().unwrap_or(NO_ANSWER).to_owned(),
            correct: line.correct_text().to_owned(),
            is_correct: line.is_correct,
        })
        .collect();

    SummaryVm {
        correct: score.correct(),
        wrong: score.wrong(),
        total: score.total(),
        percentage: score.percentage(),
        stars: tier.stars(),
        label: tier.label(),
        message: tier.message(),
        tier_css: tier.css_modifier(),
        lines,
    }
}
