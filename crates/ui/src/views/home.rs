use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HomeVm, TopicCardVm, map_home};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();

    let mut resource = use_resource(move || {
        let quiz = quiz.clone();
        async move {
            let catalog = quiz.topic_catalog().await.map_err(|_| ViewError::Unknown)?;
            Ok::<HomeVm, ViewError>(map_home(&catalog))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home",
            section { class: "hero",
                h1 { "Kuiz Refleksologi" }
                p { class: "hero-sub", "Tangan, Kaki & Telinga" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Memuatkan topik..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error-card",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            onclick: move |_| resource.restart(),
                            "Cuba Semula"
                        }
                    }
                },
                ViewState::Ready(home) => rsx! {
                    FullQuizCard {
                        label: home.full_quiz_label,
                        count_label: home.full_quiz_count_label.clone(),
                    }
                    h2 { class: "section-title", "Pilih Topik" }
                    if home.has_questions() {
                        ul { class: "topic-grid",
                            for topic in home.topics {
                                TopicCard { key: "{topic.name}", topic }
                            }
                        }
                    } else {
                        p { class: "muted", "Tiada soalan dijumpai." }
                    }
                },
            }

            div { class: "admin-link",
                Link { to: Route::Admin {}, "Papan Kedudukan Peserta" }
            }
        }
    }
}

#[component]
fn FullQuizCard(label: &'static str, count_label: String) -> Element {
    rsx! {
        Link {
            class: "full-quiz-card",
            to: Route::Quiz { topic: String::new() },
            h2 { "{label}" }
            p { "Semua topik digabungkan" }
            span { class: "count", "{count_label}" }
        }
    }
}

#[component]
fn TopicCard(topic: TopicCardVm) -> Element {
    rsx! {
        li {
            Link {
                class: "topic-card",
                to: Route::Quiz { topic: topic.name.clone() },
                span { class: "topic-kicker", "Topik khusus" }
                span { class: "topic-name", "{topic.name}" }
                span { class: "count", "{topic.count_label}" }
            }
        }
    }
}
