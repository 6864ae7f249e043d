use dioxus::prelude::*;
use portfolio::{AcceptPolicy, CertificateDraft, Form};

use super::submit::use_submit;
use super::StatusBanner;
use crate::files::pick_one;

/// Form for a certificate card: title, issuer, optional date and link, and an
/// icon image.
#[component]
pub fn CertificateForm() -> Element {
    let mut form = use_signal(Form::<CertificateDraft>::new);
    let mut submit = use_submit(form);

    let draft = form.read().draft().clone();
    let status = form.read().status().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Add Certificate" }

            form {
                class: "record-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit();
                },

                label { "Title *" }
                input {
                    value: "{draft.title}",
                    placeholder: "e.g. React (Basic)",
                    oninput: move |e| form.write().edit(|d| d.title = e.value()),
                }

                label { "Issuer *" }
                input {
                    value: "{draft.issuer}",
                    placeholder: "e.g. HackerRank",
                    oninput: move |e| form.write().edit(|d| d.issuer = e.value()),
                }

                label { "Date" }
                input {
                    r#type: "date",
                    value: "{draft.date}",
                    oninput: move |e| form.write().edit(|d| d.date = e.value()),
                }

                label { "Link" }
                input {
                    r#type: "url",
                    value: "{draft.link}",
                    placeholder: "https://",
                    oninput: move |e| form.write().edit(|d| d.link = e.value()),
                }

                label { "Icon *" }
                input {
                    r#type: "file",
                    disabled: submitting,
                    accept: AcceptPolicy::Images.accept_attr(),
                    onchange: move |evt: FormEvent| async move {
                        match pick_one(&evt, AcceptPolicy::Images, "Icon").await {
                            Some(Ok(file)) => form.write().edit(|d| d.icon = Some(file)),
                            Some(Err(err)) => form.write().reject(err),
                            None => {}
                        }
                    },
                }
                if let Some(icon) = &draft.icon {
                    span { class: "file-name", "{icon.name}" }
                }

                StatusBanner { status }

                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting,
                    if submitting { "Uploading..." } else { "Add Certificate" }
                }
            }
        }
    }
}
