use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AdminView, HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz?:topic", QuizView)] Quiz { topic: String },
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { class: "brand", to: Route::Home {}, "Kuiz Refleksologi" }
                nav {
                    Link { to: Route::Home {}, "Laman Utama" }
                    Link { to: Route::Admin {}, "Admin" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            footer { class: "footer",
                "Kuiz Refleksologi"
            }
        }
    }
}
