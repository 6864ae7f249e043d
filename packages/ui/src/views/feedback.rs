use dioxus::prelude::*;
use portfolio::FormStatus;

/// Horizontal progress indicator, 0..=100.
#[component]
pub fn ProgressBar(value: u8) -> Element {
    let value = value.min(100);
    rsx! {
        div {
            class: "progress",
            role: "progressbar",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{value}",
            div { class: "progress-fill", style: "width: {value}%" }
        }
        span { class: "progress-label", "Uploading: {value}%" }
    }
}

/// Inline message for a form's status. Renders nothing while idle.
#[component]
pub fn StatusBanner(status: FormStatus) -> Element {
    match status {
        FormStatus::Idle => rsx! {},
        FormStatus::Submitting { progress } => rsx! {
            ProgressBar { value: progress }
        },
        FormStatus::Succeeded(message) => rsx! {
            div { class: "banner banner-success", "{message}" }
        },
        FormStatus::Failed(message) => rsx! {
            div { class: "banner banner-error", role: "alert", "{message}" }
        },
    }
}
