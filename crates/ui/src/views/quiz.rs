use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::model::TopicScope;
use services::{LoadGuard, Participant, ResultService};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    OptionVm, QuestionCardVm, QuizIntent, QuizPhase, QuizVm, SubmissionJob, SubmissionStatus,
    SummaryVm, display_date, map_summary, start_guarded,
};

const FORM_ERROR: &str = "Sila masukkan nama dan tarikh yang sah.";

#[derive(Clone, Debug, PartialEq)]
enum Screen {
    Participant,
    Question(QuestionCardVm),
    Summary(SummaryVm, SubmissionStatus),
}

fn screen_for(vm: &QuizVm) -> Screen {
    match vm.phase() {
        QuizPhase::Participant => Screen::Participant,
        QuizPhase::Question => Screen::Question(vm.question_card()),
        QuizPhase::Summary => Screen::Summary(map_summary(vm.session()), vm.submission()),
    }
}

fn spawn_submission(
    mut vm: Signal<Option<QuizVm>>,
    results: Arc<ResultService>,
    job: SubmissionJob,
) {
    spawn(async move {
        let attempt = job.attempt;
        let ok = job.run(&results).await.is_ok();
        if let Some(vm) = vm.write().as_mut() {
            vm.finish_submission(attempt, ok);
        }
    });
}

#[component]
pub fn QuizView(topic: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz = ctx.quiz();
    let results = ctx.results();

    let vm = use_signal(|| None::<QuizVm>);
    let guard = use_hook(LoadGuard::new);
    {
        let guard = guard.clone();
        use_drop(move || guard.cancel());
    }

    let mut resource = {
        let quiz = quiz.clone();
        let guard = guard.clone();
        let topic = topic.clone();
        use_resource(use_reactive!(|(topic,)| {
            let quiz = quiz.clone();
            let guard = guard.clone();
            let mut vm = vm;
            async move {
                vm.set(None);
                let scope = TopicScope::from_selector(Some(&topic));
                if let Some(started) = start_guarded(&quiz, &guard, scope).await? {
                    vm.set(Some(started));
                }
                Ok::<_, ViewError>(())
            }
        }))
    };
    let state = view_state_from_resource(&resource);

    let submit = {
        let results = results.clone();
        use_callback(move |()| {
            let mut vm = vm;
            let job = vm.write().as_mut().and_then(QuizVm::begin_submission);
            if let Some(job) = job {
                spawn_submission(vm, results.clone(), job);
            }
        })
    };

    let dispatch = {
        let quiz = quiz.clone();
        let results = results.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let job = vm.write().as_mut().and_then(|vm| vm.dispatch(intent, &quiz));
            if let Some(job) = job {
                spawn_submission(vm, results.clone(), job);
            }
        })
    };

    let on_participant = use_callback(move |participant: Participant| {
        let mut vm = vm;
        if let Some(vm) = vm.write().as_mut() {
            vm.set_participant(participant);
        }
    });

    let (scope_label, screen) = {
        let guard = vm.read();
        let scope_label = TopicScope::from_selector(Some(&topic)).label().to_owned();
        (scope_label, guard.as_ref().map(screen_for))
    };
    let today = results.today();

    rsx! {
        div { class: "page quiz",
            header { class: "quiz-header",
                button {
                    class: "btn btn-ghost",
                    aria_label: "Kembali ke Laman Utama",
                    onclick: move |_| {
                        navigator.push(Route::Home {});
                    },
                    "←"
                }
                div {
                    h1 { "Kuiz Refleksologi" }
                    span { class: "quiz-scope", "{scope_label}" }
                }
            }

            match (state, screen) {
                (ViewState::Idle | ViewState::Loading, _) => rsx! {
                    p { class: "muted", "Memuatkan soalan..." }
                },
                (ViewState::Error(err), _) => rsx! {
                    div { class: "error-card",
                        p { "{err.message()}" }
                        if err == ViewError::Unknown {
                            button {
                                class: "btn btn-primary",
                                onclick: move |_| resource.restart(),
                                "Cuba Semula"
                            }
                        }
                        Link { class: "btn btn-secondary", to: Route::Home {}, "Kembali ke Laman Utama" }
                    }
                },
                (ViewState::Ready(()), None) => rsx! {
                    p { class: "muted", "Memuatkan soalan..." }
                },
                (ViewState::Ready(()), Some(Screen::Participant)) => rsx! {
                    ParticipantForm { scope_label: scope_label.clone(), today, on_submit: on_participant }
                },
                (ViewState::Ready(()), Some(Screen::Question(card))) => rsx! {
                    QuestionCard { card, on_intent: dispatch }
                },
                (ViewState::Ready(()), Some(Screen::Summary(summary, status))) => rsx! {
                    QuizSummary { summary, status, on_intent: dispatch, on_retry: submit }
                },
            }
        }
    }
}

#[component]
fn ParticipantForm(
    scope_label: String,
    today: NaiveDate,
    on_submit: EventHandler<Participant>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut date = use_signal(|| today.format("%Y-%m-%d").to_string());
    let mut form_error = use_signal(|| None::<&'static str>);

    let preview = display_date(&date.read());

    rsx! {
        div { class: "participant-form",
            h2 { "Maklumat Peserta" }
            p { class: "muted", "Sila masukkan nama dan tarikh anda sebelum memulakan kuiz: {scope_label}." }

            label { r#for: "participant-name", "Nama Penuh *" }
            input {
                id: "participant-name",
                r#type: "text",
                placeholder: "Masukkan nama anda...",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }

            label { r#for: "participant-date", "Tarikh *" }
            input {
                id: "participant-date",
                r#type: "date",
                value: "{date}",
                oninput: move |evt| date.set(evt.value()),
            }
            span { class: "date-preview", "{preview}" }

            if let Some(message) = form_error() {
                p { class: "form-error", "{message}" }
            }

            button {
                class: "btn btn-primary",
                disabled: name.read().trim().is_empty() || date.read().trim().is_empty(),
                onclick: move |_| {
                    let parsed = NaiveDate::parse_from_str(date.read().trim(), "%Y-%m-%d")
                        .ok()
                        .and_then(|day| Participant::new(name.read().as_str(), day).ok());
                    match parsed {
                        Some(participant) => {
                            form_error.set(None);
                            on_submit.call(participant);
                        }
                        None => form_error.set(Some(FORM_ERROR)),
                    }
                },
                "Mula Kuiz →"
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm, on_intent: Callback<QuizIntent>) -> Element {
    let answered = card.feedback.is_some();
    let progress = format!("{:.0}", card.progress_percent);

    rsx! {
        div { class: "question-card",
            div { class: "progress",
                span { "Soalan {card.number} / {card.total}" }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {progress}%" }
                }
            }

            span { class: "question-topic", "{card.topic}" }
            h2 { class: "question-text", "{card.text}" }

            ul { class: "options",
                for option in card.options.clone() {
                    OptionButton { key: "{option.index}", option, answered, on_intent }
                }
            }

            if let Some(feedback) = card.feedback {
                div { class: "feedback feedback-{feedback.css_modifier()}",
                    p { "{feedback.message()}" }
                    button {
                        class: "btn btn-link",
                        onclick: move |_| on_intent.call(QuizIntent::ToggleExplanation),
                        "{card.explanation_toggle_label}"
                    }
                    if let Some(explanation) = card.explanation.clone() {
                        p { class: "explanation", "{explanation}" }
                    }
                }
            }

            button {
                class: "btn btn-primary",
                disabled: !answered,
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "{card.next_label}"
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, answered: bool, on_intent: Callback<QuizIntent>) -> Element {
    let index = option.index;
    rsx! {
        li {
            button {
                class: "option option-{option.state.css_modifier()}",
                disabled: answered,
                onclick: move |_| on_intent.call(QuizIntent::Select(index)),
                span { class: "option-label", "{option.label}" }
                span { class: "option-text", "{option.text}" }
            }
        }
    }
}

#[component]
pub(crate) fn QuizSummary(
    summary: SummaryVm,
    status: SubmissionStatus,
    on_intent: Callback<QuizIntent>,
    on_retry: Callback<()>,
) -> Element {
    rsx! {
        div { class: "summary summary-{summary.tier_css}",
            div { class: "stars",
                for (i, filled) in summary.star_slots().into_iter().enumerate() {
                    span { key: "{i}", class: if filled { "star star-filled" } else { "star" }, "★" }
                }
            }
            div { class: "score-circle",
                span { class: "score", "{summary.correct}" }
                span { class: "muted", "daripada {summary.total}" }
            }
            h2 { "{summary.label}" }
            p { class: "muted", "{summary.message}" }
            div { class: "pct-badge",
                "{summary.percentage}% Betul ({summary.correct}/{summary.total} soalan)"
            }

            div { class: "counts",
                div { span { class: "count-correct", "{summary.correct}" } p { "Betul" } }
                div { span { class: "count-wrong", "{summary.wrong}" } p { "Salah" } }
                div { span { class: "count-total", "{summary.total}" } p { "Jumlah" } }
            }

            if let Some(message) = status.message() {
                p { class: "submission submission-{status:?}", "{message}" }
            }
            if status == SubmissionStatus::Failed {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_retry.call(()),
                    "Hantar Semula"
                }
            }

            h3 { "Semakan Jawapan" }
            ol { class: "breakdown",
                for line in summary.lines.clone() {
                    li {
                        key: "{line.number}",
                        class: if line.is_correct { "line-correct" } else { "line-wrong" },
                        p { class: "line-question", "{line.question}" }
                        p { "Jawapan anda: {line.selected}" }
                        if !line.is_correct {
                            p { "Jawapan betul: {line.correct}" }
                        }
                    }
                }
            }

            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_intent.call(QuizIntent::Restart),
                    "Cuba Lagi"
                }
                Link { class: "btn btn-secondary", to: Route::Home {}, "Laman Utama" }
            }
        }
    }
}
