//! Sign-in page.

use dioxus::prelude::*;
use ui::views::LoginView;

/// Leaving this page after sign-in is the route gate's job.
#[component]
pub fn Login() -> Element {
    rsx! {
        LoginView {}
    }
}
