//! Score, percentage and performance tier calculations.
//!
//! Percentages round half up: `12.5` becomes `13`. Integer percentages are
//! computed without floating point so boundaries such as `1/8` are exact.

use crate::answers::AnswerSheet;
use crate::model::Question;

/// Lowest percentage that counts as a pass on the leaderboard.
pub const PASS_PERCENTAGE: f64 = 70.0;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Number of questions whose recorded answer matches the correct option.
#[must_use]
pub fn score(questions: &[Question], answers: &AnswerSheet) -> u32 {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(*index)
                .is_some_and(|selected| question.is_correct(selected))
        })
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

/// `round(score / total * 100)`, or `0` when `total` is zero.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Round a stored percentage for display and aggregation.
#[must_use]
pub fn round_percentage(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // Non-negative and bounded by the result invariants, so the cast cannot wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = value.round().min(f64::from(u32::MAX)) as u32;
    rounded
}

/// Final tally for a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    correct: u32,
    total: u32,
}

impl QuizScore {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn compute(questions: &[Question], answers: &AnswerSheet) -> Self {
        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self::new(score(questions, answers), total)
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.total)
    }

    #[must_use]
    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_percentage(f64::from(self.percentage()))
    }
}

//
// ─── PERFORMANCE TIER ──────────────────────────────────────────────────────────
//

/// Qualitative band for a final percentage. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformanceTier {
    /// 90 and above.
    Excellent,
    /// 70 to below 90.
    Good,
    /// 50 to below 70.
    NeedsImprovement,
    /// Below 50.
    NeedsMoreEffort,
}

impl PerformanceTier {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= PASS_PERCENTAGE {
            Self::Good
        } else if percentage >= 50.0 {
            Self::NeedsImprovement
        } else {
            Self::NeedsMoreEffort
        }
    }

    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            Self::Excellent => 3,
            Self::Good => 2,
            Self::NeedsImprovement => 1,
            Self::NeedsMoreEffort => 0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Cemerlang",
            Self::Good => "Bagus",
            Self::NeedsImprovement => "Boleh Ditingkatkan",
            Self::NeedsMoreEffort => "Perlu Lebih Usaha",
        }
    }

    /// Encouragement shown under the summary heading.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Luar biasa! Anda menguasai topik ini dengan sangat baik.",
            Self::Good => "Prestasi yang baik! Teruskan usaha untuk mencapai yang lebih tinggi.",
            Self::NeedsImprovement => "Anda berada di landasan yang betul. Ulang kaji dan cuba lagi!",
            Self::NeedsMoreEffort => "Jangan putus asa! Baca semula nota dan cuba lagi.",
        }
    }

    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "improve",
            Self::NeedsMoreEffort => "effort",
        }
    }
}

//
// ─── BREAKDOWN ─────────────────────────────────────────────────────────────────
//

/// Per-question line of the summary breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub number: usize,
    pub question: &'a Question,
    pub selected: Option<usize>,
    pub is_correct: bool,
}

impl<'a> QuestionReview<'a> {
    /// Text of the chosen option, or `None` when the question was skipped.
    #[must_use]
    pub fn selected_text(&self) -> Option<&'a str> {
        self.selected.and_then(|index| self.question.answer(index))
    }

    #[must_use]
    pub fn correct_text(&self) -> &'a str {
        self.question.correct_answer()
    }
}

/// Question-by-question outcome in session order.
#[must_use]
pub fn breakdown<'a>(questions: &'a [Question], answers: &AnswerSheet) -> Vec<QuestionReview<'a>> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(index);
            QuestionReview {
                number: index + 1,
                question,
                selected,
                is_correct: selected.is_some_and(|s| question.is_correct(s)),
            }
        })
        .collect()
}
