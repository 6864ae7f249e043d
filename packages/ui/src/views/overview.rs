use dioxus::prelude::*;
use portfolio::FormKind;

use crate::use_session;

/// Landing page of the dashboard: one card per entry form.
#[component]
pub fn OverviewView(on_navigate: EventHandler<String>) -> Element {
    let session = use_session();
    let greeting = match session().user() {
        Some(user) => format!("Welcome, {}", user.display_name()),
        None => "Welcome".to_string(),
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "{greeting}" }
            p { "Add portfolio content from one of the forms below." }

            div {
                class: "overview-grid",
                for kind in FormKind::ALL {
                    button {
                        key: "{kind.slug()}",
                        class: "overview-card",
                        onclick: move |_| on_navigate.call(kind.path()),
                        h2 { "{kind.label()}" }
                    }
                }
            }
        }
    }
}
