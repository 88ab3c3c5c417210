use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardRowVm, LeaderboardVm, PrintCardVm, map_leaderboard, print_date_label};

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();
    let today = ctx.results().today();
    let mut selected = use_signal(|| None::<PrintCardVm>);

    let mut resource = use_resource(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let board = leaderboard
                .leaderboard()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<LeaderboardVm, ViewError>(map_leaderboard(&board))
        }
    });

    let state = view_state_from_resource(&resource);
    let refreshing = matches!(state, ViewState::Loading);

    let on_print = use_callback(move |card: PrintCardVm| {
        selected.set(Some(card));
        spawn(async move {
            // Let the print sheet render before the dialog opens.
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            let _ = eval("window.print();");
        });
    });

    rsx! {
        div { class: "page admin",
            header { class: "admin-header",
                Link { class: "btn btn-ghost", to: Route::Home {}, "← Laman Utama" }
                h1 { "Papan Kedudukan Peserta" }
                button {
                    class: "btn btn-secondary",
                    disabled: refreshing,
                    onclick: move |_| resource.restart(),
                    if refreshing { "Memuatkan..." } else { "Muat Semula" }
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Memuatkan keputusan..." }
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
                ViewState::Ready(board) => rsx! {
                    StatsPanel { board: board.clone() }
                    if board.is_empty() {
                        p { class: "empty", "Tiada keputusan lagi" }
                    } else {
                        table { class: "leaderboard",
                            thead {
                                tr {
                                    th { "Kedudukan" }
                                    th { "Nama" }
                                    th { "Tarikh" }
                                    th { "Topik" }
                                    th { "Markah" }
                                    th { "Peratus" }
                                    th { "Cetak" }
                                }
                            }
                            tbody {
                                for row in board.rows {
                                    LeaderboardRow { key: "{row.rank}", row, on_print }
                                }
                            }
                        }
                    }
                },
            }

            if let Some(card) = selected() {
                PrintCard { card, printed_on: print_date_label(today) }
            }
        }
    }
}

#[component]
fn StatsPanel(board: LeaderboardVm) -> Element {
    let stats = board.stats;
    rsx! {
        div { class: "stats",
            div { class: "stat",
                span { class: "stat-value", "{stats.participants}" }
                span { class: "stat-label", "Peserta" }
            }
            div { class: "stat",
                span { class: "stat-value", "{stats.top_percentage}%" }
                span { class: "stat-label", "Markah Tertinggi" }
            }
            div { class: "stat",
                span { class: "stat-value", "{stats.average_percentage}%" }
                span { class: "stat-label", "Purata Markah" }
            }
            div { class: "stat",
                span { class: "stat-value", "{stats.pass_count}" }
                span { class: "stat-label", "Lulus (≥70%)" }
            }
        }
    }
}

#[component]
fn LeaderboardRow(row: LeaderboardRowVm, on_print: Callback<PrintCardVm>) -> Element {
    let card = row.print.clone();
    rsx! {
        tr { class: "rank-{row.badge_css}",
            td {
                if let Some(icon) = row.badge_icon {
                    span { class: "badge badge-{row.badge_css}", "{icon}" }
                }
                span { class: "rank", "{row.rank}" }
            }
            td { "{row.name}" }
            td { "{row.date}" }
            td { "{row.topic}" }
            td { "{row.score_label}" }
            td {
                span { class: "pct pct-{row.band_css}", "{row.percentage}%" }
            }
            td {
                button {
                    class: "btn btn-small",
                    onclick: move |_| on_print.call(card.clone()),
                    "Cetak"
                }
            }
        }
    }
}

#[component]
fn PrintCard(card: PrintCardVm, printed_on: String) -> Element {
    rsx! {
        div { class: "admin-print-card",
            h1 { "Keputusan Kuiz Refleksologi" }
            p { class: "print-date", "{printed_on}" }

            section { class: "print-participant",
                h2 { "Maklumat Peserta" }
                table {
                    tbody {
                        tr { td { "Nama" } td { ": {card.name}" } }
                        tr { td { "Tarikh" } td { ": {card.date}" } }
                        tr { td { "Topik" } td { ": {card.topic}" } }
                    }
                }
            }

            section { class: "print-score",
                h2 { "Keputusan: {card.tier_label}" }
                table {
                    tbody {
                        tr {
                            td { class: "count-correct", "{card.correct}" }
                            td { class: "count-wrong", "{card.wrong}" }
                            td { "{card.total}" }
                        }
                        tr {
                            td { "Betul" }
                            td { "Salah" }
                            td { "Jumlah" }
                        }
                    }
                }
                p { "Markah: {card.correct}/{card.total} ({card.percentage}% Betul)" }
            }
        }
    }
}
