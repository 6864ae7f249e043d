use dioxus::prelude::*;
use portfolio::routes::DASHBOARD_PATH;
use portfolio::FormKind;

use crate::{use_session, LogoutButton};

/// Navigation for the admin shell. Entries come from the route table.
///
/// `active` is `None` on the overview. Below the `lg` breakpoint the sidebar
/// slides in only while `open`; above it, it is always visible.
#[component]
pub fn AdminSidebar(
    active: Option<FormKind>,
    open: bool,
    on_navigate: EventHandler<String>,
    on_signed_out: EventHandler<()>,
) -> Element {
    let session = use_session();
    let user_name = session().user().map(|u| u.display_name().to_string());

    rsx! {
        aside {
            class: if open { "admin-sidebar open" } else { "admin-sidebar" },

            div {
                class: "admin-sidebar-header",
                h2 { "Portfolio Admin" }
                if let Some(name) = user_name {
                    span { class: "admin-sidebar-user", "{name}" }
                }
            }

            nav {
                class: "admin-sidebar-nav",
                button {
                    class: if active.is_none() { "admin-nav-item active" } else { "admin-nav-item" },
                    onclick: move |_| on_navigate.call(DASHBOARD_PATH.to_string()),
                    "Dashboard"
                }
                for kind in FormKind::ALL {
                    button {
                        key: "{kind.slug()}",
                        class: if active == Some(kind) { "admin-nav-item active" } else { "admin-nav-item" },
                        onclick: move |_| on_navigate.call(kind.path()),
                        "{kind.label()}"
                    }
                }
            }

            div {
                class: "admin-sidebar-footer",
                LogoutButton {
                    class: "admin-logout",
                    on_signed_out: on_signed_out,
                }
            }
        }
    }
}
