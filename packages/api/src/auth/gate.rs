//! # Session gate
//!
//! Single source of truth for "who is signed in". The gate owns a
//! `tokio::sync::watch` channel holding the current [`Session`]; sign-in and
//! logout go through it so every subscriber observes them.
//!
//! [`SessionGate::subscribe`] yields the resolved state first (asking the
//! identity provider if nobody has yet), then one item per change. Dropping
//! the stream unsubscribes.

use std::rc::Rc;

use futures::stream::{self, LocalBoxStream, StreamExt};
use portfolio::{AuthError, IdentityProvider, Session, UserRef};
use tokio::sync::watch;

pub type SessionStream = LocalBoxStream<'static, Session>;

pub struct SessionGate<P> {
    provider: Rc<P>,
    state: Rc<watch::Sender<Session>>,
}

impl<P> Clone for SessionGate<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Rc::clone(&self.provider),
            state: Rc::clone(&self.state),
        }
    }
}

impl<P: IdentityProvider + 'static> SessionGate<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(Session::Unknown);
        Self {
            provider: Rc::new(provider),
            state: Rc::new(state),
        }
    }

    /// The last known state, possibly still `Unknown`.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Ask the provider once if the state is still unknown. A provider error
    /// resolves to `Unauthenticated`.
    async fn resolve(&self) -> Session {
        if self.state.borrow().is_resolved() {
            return self.current();
        }
        let resolved = match self.provider.current_user().await {
            Ok(user) => Session::from_user(user),
            Err(err) => {
                tracing::warn!("could not restore session: {err}");
                Session::Unauthenticated
            }
        };
        // A sign-in may have landed while the provider was answering.
        self.state.send_if_modified(|session| {
            if session.is_resolved() {
                return false;
            }
            *session = resolved;
            true
        });
        self.current()
    }

    pub fn subscribe(&self) -> SessionStream {
        let gate = self.clone();
        let rx = self.state.subscribe();
        stream::unfold((gate, rx, true), |(gate, mut rx, first)| async move {
            if first {
                gate.resolve().await;
                let session = rx.borrow_and_update().clone();
                return Some((session, (gate, rx, false)));
            }
            rx.changed().await.ok()?;
            let session = rx.borrow_and_update().clone();
            Some((session, (gate, rx, false)))
        })
        .boxed_local()
    }

    /// Sign in and broadcast the new session. On failure the state is left
    /// as it was.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserRef, AuthError> {
        let user = self.provider.sign_in(email, password).await?;
        tracing::info!("signed in as {}", user.email);
        self.state.send_replace(Session::Authenticated(user.clone()));
        Ok(user)
    }

    /// Sign out. Always ends `Unauthenticated`; a provider failure is only
    /// logged.
    pub async fn logout(&self) {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!("sign-out failed: {err}");
        } else {
            tracing::info!("signed out");
        }
        self.state.send_replace(Session::Unauthenticated);
    }
}
