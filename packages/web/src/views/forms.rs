//! Route targets inside the dashboard. Each wraps a shared view.

use dioxus::prelude::*;
use ui::views::{CertificateForm, LicenseCertificateForm, OverviewView, ProjectForm};

use crate::Route;

#[component]
pub fn Overview() -> Element {
    let nav = use_navigator();

    rsx! {
        OverviewView {
            on_navigate: move |path: String| {
                if let Ok(target) = path.parse::<Route>() {
                    nav.push(target);
                }
            },
        }
    }
}

#[component]
pub fn Certificates() -> Element {
    rsx! {
        CertificateForm {}
    }
}

#[component]
pub fn LicenseCertificates() -> Element {
    rsx! {
        LicenseCertificateForm {}
    }
}

#[component]
pub fn Projects() -> Element {
    rsx! {
        ProjectForm {}
    }
}
