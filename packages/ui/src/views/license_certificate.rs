use dioxus::prelude::*;
use portfolio::{AcceptPolicy, Form, LicenseCertificateDraft};

use super::submit::use_submit;
use super::StatusBanner;
use crate::files::pick_one;

#[component]
pub fn LicenseCertificateForm() -> Element {
    let mut form = use_signal(Form::<LicenseCertificateDraft>::new);
    let mut submit = use_submit(form);

    let draft = form.read().draft().clone();
    let status = form.read().status().clone();
    let submitting = form.read().is_submitting();

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Add License Certificate" }

            form {
                class: "record-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit();
                },

                label { "Certificate Name *" }
                input {
                    value: "{draft.certificate_name}",
                    oninput: move |e| form.write().edit(|d| d.certificate_name = e.value()),
                }

                label { "Institute Name *" }
                input {
                    value: "{draft.institute_name}",
                    oninput: move |e| form.write().edit(|d| d.institute_name = e.value()),
                }

                label { "Issue Date *" }
                input {
                    r#type: "date",
                    value: "{draft.issue_date}",
                    oninput: move |e| form.write().edit(|d| d.issue_date = e.value()),
                }

                label { "Credential ID" }
                input {
                    value: "{draft.credential_id}",
                    oninput: move |e| form.write().edit(|d| d.credential_id = e.value()),
                }

                label { "Credential URL" }
                input {
                    r#type: "url",
                    value: "{draft.credential_url}",
                    placeholder: "https://",
                    oninput: move |e| form.write().edit(|d| d.credential_url = e.value()),
                }

                label { "Certificate File (image or PDF) *" }
                input {
                    r#type: "file",
                    disabled: submitting,
                    accept: AcceptPolicy::ImagesOrPdf.accept_attr(),
                    onchange: move |evt: FormEvent| async move {
                        match pick_one(&evt, AcceptPolicy::ImagesOrPdf, "Certificate file").await {
                            Some(Ok(file)) => form.write().edit(|d| d.file = Some(file)),
                            Some(Err(err)) => form.write().reject(err),
                            None => {}
                        }
                    },
                }
                if let Some(file) = &draft.file {
                    span { class: "file-name", "{file.name}" }
                }

                label { "Issuer Icon *" }
                input {
                    r#type: "file",
                    disabled: submitting,
                    accept: AcceptPolicy::Images.accept_attr(),
                    onchange: move |evt: FormEvent| async move {
                        match pick_one(&evt, AcceptPolicy::Images, "Issuer icon").await {
                            Some(Ok(file)) => form.write().edit(|d| d.issuer_icon = Some(file)),
                            Some(Err(err)) => form.write().reject(err),
                            None => {}
                        }
                    },
                }
                if let Some(icon) = &draft.issuer_icon {
                    span { class: "file-name", "{icon.name}" }
                }

                StatusBanner { status }

                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting,
                    if submitting { "Uploading..." } else { "Upload Certificate" }
                }
            }
        }
    }
}
