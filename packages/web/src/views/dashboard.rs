use dioxus::prelude::*;

use portfolio::{routes, View};
use ui::views::AdminShellView;

use crate::Route;

/// Layout for everything under `/dashboard`.
#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();

    // Highlight the sidebar entry for the current form
    let active = match routes::view_for(&route.to_string()) {
        Some(View::Form(kind)) => Some(kind),
        _ => None,
    };

    rsx! {
        AdminShellView {
            active,
            on_navigate: move |path: String| match path.parse::<Route>() {
                Ok(target) => {
                    nav.push(target);
                }
                Err(err) => tracing::warn!("no route for {path}: {err}"),
            },
            on_signed_out: move |_| {
                nav.replace(Route::Login {});
            },
            Outlet::<Route> {}
        }
    }
}
