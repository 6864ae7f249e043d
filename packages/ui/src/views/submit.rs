use dioxus::prelude::*;
use portfolio::{BeginError, Form, RecordDraft};

use crate::use_services;

/// Submit handle for a form signal: validates synchronously, then uploads and
/// writes in a task owned by the calling component.
pub(crate) fn use_submit<D: RecordDraft + 'static>(form: Signal<Form<D>>) -> impl FnMut() + Copy {
    let services = use_services();
    let services = use_hook(|| CopyValue::new(services));

    move || {
        let mut form = form;
        let attempt = match form.write().begin() {
            Ok(attempt) => attempt,
            Err(BeginError::InFlight) => {
                tracing::debug!("{:?} form is already submitting", D::KIND);
                return;
            }
            Err(BeginError::Invalid(err)) => {
                tracing::debug!("{:?} form is invalid: {err}", D::KIND);
                return;
            }
        };

        let services = services.read().clone();
        spawn(async move {
            let outcome = attempt
                .run(&services.uploader, &services.store, move |progress| {
                    form.write().set_progress(progress)
                })
                .await;
            form.write().finish(outcome);
        });
    }
}
