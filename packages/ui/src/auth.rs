//! Session context and hooks for the UI.

use api::Services;
use dioxus::prelude::*;
use futures::StreamExt;
use portfolio::Session;

/// The service clients, provided once at the root.
pub fn use_services() -> Services {
    use_context::<Services>()
}

/// The current session. Updated only by the session gate.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Provider component that mirrors the session gate into a signal.
/// Expects [`Services`] in context; wrap the router with it.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let services = use_services();
    let mut session = use_signal(Session::default);

    // The subscription lives as long as this component.
    use_future(move || {
        let gate = services.gate.clone();
        async move {
            let mut sessions = gate.subscribe();
            while let Some(next) = sessions.next().await {
                tracing::debug!("session is now {next:?}");
                session.set(next);
            }
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to sign the current user out.
///
/// Sign-out always succeeds locally; `on_signed_out` runs afterwards so the
/// caller can navigate to the login screen.
#[component]
pub fn LogoutButton(
    on_signed_out: EventHandler<()>,
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let gate = services.gate.clone();
        async move {
            busy.set(true);
            gate.logout().await;
            busy.set(false);
            on_signed_out.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: busy(),
            onclick: onclick,
            "{label}"
        }
    }
}
