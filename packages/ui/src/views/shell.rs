use dioxus::prelude::*;
use portfolio::FormKind;

use crate::AdminSidebar;

/// Admin shell: sidebar plus content area.
///
/// Platform packages provide navigation callbacks and an `Outlet` as children.
/// On narrow screens a floating button opens the sidebar and a backdrop click
/// (or choosing an entry) closes it.
#[component]
pub fn AdminShellView(
    /// Form currently shown, `None` on the overview.
    active: Option<FormKind>,
    /// The router outlet for child routes.
    children: Element,
    /// Called with the path of the chosen sidebar entry.
    on_navigate: EventHandler<String>,
    /// Called after sign-out.
    on_signed_out: EventHandler<()>,
) -> Element {
    let mut sidebar_open = use_signal(|| false);

    rsx! {
        div {
            class: "admin-shell",

            button {
                class: "sidebar-toggle",
                aria_label: "Toggle navigation",
                onclick: move |_| sidebar_open.set(!sidebar_open()),
                if sidebar_open() { "\u{2715}" } else { "\u{2630}" }
            }

            if sidebar_open() {
                div {
                    class: "sidebar-backdrop",
                    onclick: move |_| sidebar_open.set(false),
                }
            }

            AdminSidebar {
                active: active,
                open: sidebar_open(),
                on_navigate: move |path: String| {
                    sidebar_open.set(false);
                    on_navigate.call(path);
                },
                on_signed_out: on_signed_out,
            }

            main {
                class: "admin-content",
                {children}
            }
        }
    }
}
