use quiz_core::model::TopicScope;
use quiz_core::{Advance, AnswerOutcome, QuizSession};
use services::{LoadGuard, Participant, QuizService, QuizServiceError, ResultService};
use tracing::{debug, warn};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    ToggleExplanation,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Participant,
    Question,
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    NotSubmitted,
    Sending,
    Sent,
    Failed,
}

impl SubmissionStatus {
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::NotSubmitted => None,
            Self::Sending => Some("Menghantar keputusan..."),
            Self::Sent => Some("Keputusan anda telah disimpan."),
            Self::Failed => Some("Gagal menyimpan keputusan. Sila cuba lagi."),
        }
    }
}

/// Visual state of one option button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Open,
    Correct,
    Wrong,
    Muted,
}

impl OptionState {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Correct => "correct",
            Self::Wrong => "wrong",
            Self::Muted => "muted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: char,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => "Betul! Tahniah!",
            Self::Wrong => "Salah. Cuba lagi lain kali!",
        }
    }

    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionCardVm {
    pub number: usize,
    pub total: usize,
    pub progress_percent: f64,
    pub topic: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub feedback: Option<Feedback>,
    pub explanation: Option<String>,
    pub explanation_toggle_label: &'static str,
    pub next_label: &'static str,
}

/// Letter shown beside an option: `A`, `B`, ...
#[must_use]
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

/// Everything needed to submit one finished attempt off the UI thread.
#[derive(Clone, Debug)]
pub struct SubmissionJob {
    pub attempt: u32,
    participant: Participant,
    scope: TopicScope,
    session: QuizSession,
}

impl SubmissionJob {
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the result cannot be submitted.
    pub async fn run(self, results: &ResultService) -> Result<u32, ViewError> {
        results
            .submit(&self.participant, &self.scope, &self.session)
            .await
            .map_err(|err| {
                warn!(error = %err, "could not submit quiz result");
                ViewError::Unknown
            })?;
        Ok(self.attempt)
    }
}

pub struct QuizVm {
    scope: TopicScope,
    session: QuizSession,
    participant: Option<Participant>,
    show_explanation: bool,
    submission: SubmissionStatus,
}

impl QuizVm {
    #[must_use]
    pub fn new(scope: TopicScope, session: QuizSession) -> Self {
        Self {
            scope,
            session,
            participant: None,
            show_explanation: false,
            submission: SubmissionStatus::NotSubmitted,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.participant.is_none() {
            QuizPhase::Participant
        } else if self.session.is_finished() {
            QuizPhase::Summary
        } else {
            QuizPhase::Question
        }
    }

    #[must_use]
    pub fn scope(&self) -> &TopicScope {
        &self.scope
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    pub fn set_participant(&mut self, participant: Participant) {
        self.participant = Some(participant);
    }

    #[must_use]
    pub fn submission(&self) -> SubmissionStatus {
        self.submission
    }

    /// Apply a non-restart intent. Restart needs the quiz service and goes
    /// through [`QuizVm::restart`].
    pub fn apply(&mut self, intent: QuizIntent) {
        match intent {
            QuizIntent::Select(option) => self.select(option),
            QuizIntent::Next => {
                self.next();
            }
            QuizIntent::ToggleExplanation => self.toggle_explanation(),
            QuizIntent::Restart => {}
        }
    }

    pub fn select(&mut self, option: usize) {
        if self.phase() != QuizPhase::Question {
            return;
        }
        match self.session.answer_current(option) {
            Ok(AnswerOutcome::Recorded { .. }) => self.show_explanation = false,
            Ok(AnswerOutcome::AlreadyAnswered | AnswerOutcome::Finished) => {}
            Err(err) => warn!(error = %err, "ignored invalid answer"),
        }
    }

    pub fn next(&mut self) -> Advance {
        if self.phase() != QuizPhase::Question {
            return Advance::Blocked;
        }
        let advance = self.session.advance();
        if matches!(advance, Advance::Moved { .. } | Advance::Finished) {
            self.show_explanation = false;
        }
        advance
    }

    pub fn toggle_explanation(&mut self) {
        if self.session.current_selection().is_some() {
            self.show_explanation = !self.show_explanation;
        }
    }

    /// Apply `intent` and hand back the submission to start when it just
    /// finished the quiz.
    pub fn dispatch(&mut self, intent: QuizIntent, quiz: &QuizService) -> Option<SubmissionJob> {
        match intent {
            QuizIntent::Restart => {
                self.restart(quiz);
                None
            }
            QuizIntent::Next => match self.next() {
                Advance::Finished => self.begin_submission(),
                _ => None,
            },
            other => {
                self.apply(other);
                None
            }
        }
    }

    pub fn restart(&mut self, quiz: &QuizService) {
        quiz.restart(&mut self.session);
        self.show_explanation = false;
        self.submission = SubmissionStatus::NotSubmitted;
    }

    /// Claim the current finished attempt for submission.
    ///
    /// Returns `None` unless the quiz is on its summary and this attempt has
    /// not been sent yet, so each attempt is submitted once.
    pub fn begin_submission(&mut self) -> Option<SubmissionJob> {
        if self.phase() != QuizPhase::Summary
            || !matches!(
                self.submission,
                SubmissionStatus::NotSubmitted | SubmissionStatus::Failed
            )
        {
            return None;
        }
        let participant = self.participant.clone()?;
        self.submission = SubmissionStatus::Sending;
        Some(SubmissionJob {
            attempt: self.session.attempt(),
            participant,
            scope: self.scope.clone(),
            session: self.session.clone(),
        })
    }

    /// Record the outcome of a submission started for `attempt`.
    pub fn finish_submission(&mut self, attempt: u32, ok: bool) {
        if attempt != self.session.attempt() {
            return;
        }
        self.submission = if ok {
            SubmissionStatus::Sent
        } else {
            SubmissionStatus::Failed
        };
    }

    #[must_use]
    pub fn question_card(&self) -> QuestionCardVm {
        let session = &self.session;
        let question = session.current_question();
        let selected = session.current_selection();
        let correct = question.correct_answer_index();

        let options = question
            .answers()
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let state = match selected {
                    None => OptionState::Open,
                    Some(_) if index == correct => OptionState::Correct,
                    Some(chosen) if index == chosen => OptionState::Wrong,
                    Some(_) => OptionState::Muted,
                };
                OptionVm {
                    index,
                    label: option_label(index),
                    text: text.clone(),
                    state,
                }
            })
            .collect();

        let feedback = selected.map(|chosen| {
            if question.is_correct(chosen) {
                Feedback::Correct
            } else {
                Feedback::Wrong
            }
        });
        let explanation = (selected.is_some()
            && self.show_explanation
            && !question.explanation().trim().is_empty())
        .then(|| question.explanation().to_owned());

        QuestionCardVm {
            number: session.current_index() + 1,
            total: session.total(),
            progress_percent: session.progress_percent(),
            topic: question.topic().to_owned(),
            text: question.text().to_owned(),
            options,
            feedback,
            explanation,
            explanation_toggle_label: if self.show_explanation {
                "Sembunyikan Penjelasan"
            } else {
                "Lihat Penjelasan"
            },
            next_label: if session.is_last() {
                "Lihat Keputusan"
            } else {
                "Soalan Seterusnya"
            },
        }
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when the scope has no questions.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz: &QuizService, scope: TopicScope) -> Result<QuizVm, ViewError> {
    match quiz.start_quiz(&scope).await {
        Ok(session) => Ok(QuizVm::new(scope, session)),
        Err(QuizServiceError::Empty) => Err(ViewError::EmptyQuiz),
        Err(err) => {
            warn!(error = %err, "could not start quiz");
            Err(ViewError::Unknown)
        }
    }
}

/// Start a quiz under `guard`, yielding `None` when a newer load or a
/// cancellation superseded this one while it was in flight.
///
/// # Errors
///
/// Same as [`start_quiz`], for loads that are still current.
pub async fn start_guarded(
    quiz: &QuizService,
    guard: &LoadGuard,
    scope: TopicScope,
) -> Result<Option<QuizVm>, ViewError> {
    let ticket = guard.begin();
    let started = start_quiz(quiz, scope).await;
    if !guard.is_current(ticket) {
        debug!("dropped stale quiz load");
        return Ok(None);
    }
    started.map(Some)
}
