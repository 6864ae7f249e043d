use dioxus::prelude::*;

use crate::use_services;

/// Email/password sign-in form.
///
/// A successful sign-in updates the session; the router then leaves the
/// login route on its own.
#[component]
pub fn LoginView() -> Element {
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let gate = services.gate.clone();
        async move {
            if submitting() {
                return;
            }
            if email().trim().is_empty() || password().is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }
            submitting.set(true);
            error.set(None);
            if let Err(err) = gate.sign_in(&email(), &password()).await {
                tracing::warn!("sign-in failed: {err}");
                error.set(Some(err.to_string()));
                password.set(String::new());
            }
            submitting.set(false);
        }
    };

    rsx! {
        div {
            class: "login-page",
            form {
                class: "login-card",
                onsubmit: onsubmit,
                h1 { "Admin Login" }

                if let Some(message) = error() {
                    div { class: "banner banner-error", role: "alert", "{message}" }
                }

                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    autocomplete: "username",
                    value: "{email}",
                    oninput: move |e| email.set(e.value()),
                }

                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{password}",
                    oninput: move |e| password.set(e.value()),
                }

                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
