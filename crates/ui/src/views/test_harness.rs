use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::QuizSession;
use quiz_core::model::Question;
use quiz_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::AppServices;
use storage::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizSummary;
use crate::views::{AdminView, HomeView, QuizView};
use crate::vm::{QuizIntent, SubmissionStatus, map_summary};

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(String),
    Admin,
    /// A finished attempt over the harness questions. Questions whose text is
    /// listed are answered wrongly, the rest correctly.
    Summary {
        wrong: Vec<String>,
        status: SubmissionStatus,
    },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    questions: Vec<Question>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.questions.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(topic) => rsx! { QuizView { topic } },
        ViewKind::Admin => rsx! { AdminView {} },
        ViewKind::Summary { wrong, status } => rsx! { FinishedSummary { wrong, status } },
    }
}

fn finished_session(questions: &[Question], wrong: &[String]) -> QuizSession {
    let mut session =
        QuizSession::start(questions, &mut StdRng::seed_from_u64(42)).expect("non-empty bank");
    while !session.is_finished() {
        let question = session.current_question();
        let correct = question.correct_answer_index();
        let pick = if wrong.iter().any(|text| text == question.text()) {
            (correct + 1) % question.answers().len()
        } else {
            correct
        };
        session.answer_current(pick).expect("valid option");
        session.advance();
    }
    session
}

#[component]
fn FinishedSummary(wrong: Vec<String>, status: SubmissionStatus) -> Element {
    let questions = use_context::<Vec<Question>>();
    let summary = map_summary(&finished_session(&questions, &wrong));
    let on_intent = use_callback(|_: QuizIntent| {});
    let on_retry = use_callback(|()| {});
    rsx! { QuizSummary { summary, status, on_intent, on_retry } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn question(topic: &str, text: &str, correct: usize) -> Question {
    Question::new(
        topic,
        text,
        vec!["Tumit".into(), "Ibu jari".into(), "Lengkung".into(), "Buku lali".into()],
        "Penjelasan ringkas.",
        correct,
    )
    .expect("valid question")
}

pub fn setup_view_harness(view: ViewKind, questions: Vec<Question>) -> ViewHarness {
    let repo = InMemoryRepository::with_questions(questions.clone(), fixed_clock());
    build_harness(view, Storage::from_repo(repo), questions)
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    build_harness(view, storage, Vec::new())
}

fn build_harness(view: ViewKind, storage: Storage, questions: Vec<Question>) -> ViewHarness {
    let app = Arc::new(AppServices::from_storage(&storage, fixed_clock(), Some(42)));
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            questions,
        },
    );
    ViewHarness { dom, storage }
}
