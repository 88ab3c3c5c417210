use std::fmt;

use rand::Rng;
use thiserror::Error;

use crate::answers::AnswerSheet;
use crate::model::Question;
use crate::scoring::{QuestionReview, QuizScore, breakdown};
use crate::shuffle::shuffled;

//
// ─── STATE & OUTCOMES ──────────────────────────────────────────────────────────
//

/// Lifecycle of a started session. Loading happens before a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Finished,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { correct: bool },
    /// The question already had an answer; the first one stands.
    AlreadyAnswered,
    /// The session is over; nothing was recorded.
    Finished,
}

/// What happened when the user asked to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Current question is unanswered; nothing moved.
    Blocked,
    Moved { index: usize },
    Finished,
    AlreadyFinished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this quiz")]
    Empty,

    #[error("question index {index} is out of range for {len} questions")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} is out of range for {len} answers")]
    OptionOutOfRange { option: usize, len: usize },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's pass through a shuffled question set.
///
/// The set is shuffled once on start and again on every restart. The current
/// index only moves forward one step at a time, and each question accepts a
/// single answer.
#[derive(Clone, PartialEq)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: AnswerSheet,
    finished: bool,
    attempt: u32,
}

impl QuizSession {
    /// Shuffle `questions` and begin at the first one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when there is nothing to ask.
    pub fn start<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let questions = shuffled(questions, rng);
        let answers = AnswerSheet::with_len(questions.len());
        Ok(Self {
            questions,
            current: 0,
            answers,
            finished: false,
            attempt: 0,
        })
    }

    /// Record `option` for the question at `index`.
    ///
    /// Repeat answers for the same question are ignored, as are answers after
    /// the session finished.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionOutOfRange` or `SessionError::OptionOutOfRange`
    /// for indexes that do not exist. These indicate a caller bug.
    pub fn answer(&mut self, index: usize, option: usize) -> Result<AnswerOutcome, SessionError> {
        let len = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(SessionError::QuestionOutOfRange { index, len })?;
        let options = question.answers().len();
        if option >= options {
            return Err(SessionError::OptionOutOfRange {
                option,
                len: options,
            });
        }
        if self.finished {
            return Ok(AnswerOutcome::Finished);
        }

        let correct = question.is_correct(option);
        if self.answers.record(index, option) {
            Ok(AnswerOutcome::Recorded { correct })
        } else {
            Ok(AnswerOutcome::AlreadyAnswered)
        }
    }

    /// Record `option` for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OptionOutOfRange` for an option the question lacks.
    pub fn answer_current(&mut self, option: usize) -> Result<AnswerOutcome, SessionError> {
        self.answer(self.current, option)
    }

    /// Move past the current question once it has been answered.
    pub fn advance(&mut self) -> Advance {
        if self.finished {
            return Advance::AlreadyFinished;
        }
        if !self.answers.is_answered(self.current) {
            return Advance::Blocked;
        }
        if self.is_last() {
            self.finished = true;
            return Advance::Finished;
        }
        self.current += 1;
        Advance::Moved {
            index: self.current,
        }
    }

    /// Reshuffle and start over from the first question.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions = shuffled(&self.questions, rng);
        self.current = 0;
        self.answers.clear();
        self.finished = false;
        self.attempt = self.attempt.wrapping_add(1);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.finished {
            SessionState::Finished
        } else {
            SessionState::InProgress
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// Option chosen for the current question, if any.
    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.answers.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// How many times this session has been restarted.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Completion as a percentage in `[0, 100]`, counting the current
    /// question once it is answered.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let done = self.current + usize::from(self.answers.is_answered(self.current));
        #[allow(clippy::cast_precision_loss)]
        let pct = done as f64 / self.questions.len() as f64 * 100.0;
        pct
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore::compute(&self.questions, &self.answers)
    }

    #[must_use]
    pub fn breakdown(&self) -> Vec<QuestionReview<'_>> {
        breakdown(&self.questions, &self.answers)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.answered_count())
            .field("finished", &self.finished)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank(correct: &[usize]) -> Vec<Question> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    "Kaki",
                    format!("Q{i}"),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    format!("E{i}"),
                    c,
                )
                .unwrap()
            })
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_set_cannot_start() {
        let err = QuizSession::start(&[], &mut rng()).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn start_shuffles_a_copy() {
        let questions = bank(&[0, 1, 2, 3, 0, 1, 2, 3]);
        let session = QuizSession::start(&questions, &mut rng()).unwrap();
        assert_eq!(session.total(), questions.len());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.answers().is_empty());
        for q in &questions {
            assert!(session.questions().contains(q));
        }
    }

    #[test]
    fn advance_before_answer_is_blocked() {
        let mut session = QuizSession::start(&bank(&[0, 1]), &mut rng()).unwrap();
        assert_eq!(session.advance(), Advance::Blocked);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_moves_one_step_then_finishes() {
        let mut session = QuizSession::start(&bank(&[0, 1]), &mut rng()).unwrap();
        session.answer_current(0).unwrap();
        assert_eq!(session.advance(), Advance::Moved { index: 1 });
        assert_eq!(session.current_index(), 1);

        session.answer_current(0).unwrap();
        assert_eq!(session.advance(), Advance::Finished);
        assert!(session.is_finished());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.advance(), Advance::AlreadyFinished);
    }

    #[test]
    fn first_answer_is_authoritative() {
        let mut session = QuizSession::start(&bank(&[2]), &mut rng()).unwrap();
        assert_eq!(
            session.answer(0, 2).unwrap(),
            AnswerOutcome::Recorded { correct: true }
        );
        assert_eq!(session.answer(0, 1).unwrap(), AnswerOutcome::AlreadyAnswered);
        assert_eq!(session.current_selection(), Some(2));
    }

    #[test]
    fn out_of_range_answers_are_guarded() {
        let mut session = QuizSession::start(&bank(&[0, 0]), &mut rng()).unwrap();
        assert_eq!(
            session.answer(5, 0).unwrap_err(),
            SessionError::QuestionOutOfRange { index: 5, len: 2 }
        );
        assert_eq!(
            session.answer(0, 4).unwrap_err(),
            SessionError::OptionOutOfRange { option: 4, len: 4 }
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn answers_after_finish_are_ignored() {
        let mut session = QuizSession::start(&bank(&[0]), &mut rng()).unwrap();
        session.answer_current(1).unwrap();
        session.advance();
        assert_eq!(session.answer(0, 0).unwrap(), AnswerOutcome::Finished);
        assert_eq!(session.current_selection(), Some(1));
    }

    #[test]
    fn progress_counts_answered_current_question() {
        let mut session = QuizSession::start(&bank(&[0, 0, 0, 0]), &mut rng()).unwrap();
        assert!((session.progress_percent() - 0.0).abs() < f64::EPSILON);
        session.answer_current(0).unwrap();
        assert!((session.progress_percent() - 25.0).abs() < f64::EPSILON);
        session.advance();
        assert!((session.progress_percent() - 25.0).abs() < f64::EPSILON);
        for _ in 0..3 {
            session.answer_current(0).unwrap();
            session.advance();
        }
        assert!((session.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn restart_resets_shape() {
        let mut r = rng();
        let mut session = QuizSession::start(&bank(&[0, 1, 2]), &mut r).unwrap();
        session.answer_current(0).unwrap();
        session.advance();
        session.answer_current(1).unwrap();

        session.restart(&mut r);
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.is_finished());
        assert_eq!(session.total(), 3);
        assert_eq!(session.attempt(), 1);
    }

    #[test]
    fn restart_from_finished_returns_to_progress() {
        let mut r = rng();
        let mut session = QuizSession::start(&bank(&[0]), &mut r).unwrap();
        session.answer_current(0).unwrap();
        session.advance();
        assert_eq!(session.state(), SessionState::Finished);
        session.restart(&mut r);
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn full_run_scores_by_shuffled_order() {
        let questions = bank(&[1, 2, 2, 3]);
        let mut session = QuizSession::start(&questions, &mut rng()).unwrap();
        // Answer each shuffled question with its correct option except one.
        for step in 0..session.total() {
            let correct = session.current_question().correct_answer_index();
            let pick = if step == 0 { (correct + 1) % 4 } else { correct };
            session.answer_current(pick).unwrap();
            session.advance();
        }
        let score = session.score();
        assert_eq!(score.correct(), 3);
        assert_eq!(score.percentage(), 75);
        let lines = session.breakdown();
        assert!(!lines[0].is_correct);
        assert!(lines[1..].iter().all(|line| line.is_correct));
    }
}
