//! # Firebase Auth REST client
//!
//! Email/password sign-in against the Identity Toolkit API.
//!
//! ## Endpoints
//!
//! | Call | Endpoint |
//! |------|----------|
//! | sign in | `POST {auth_base}/accounts:signInWithPassword?key=…` |
//! | restore | `POST {token_base}/token?key=…` (refresh-token grant), then `POST {auth_base}/accounts:lookup?key=…` |
//!
//! Sign-out has no endpoint: the tokens are dropped locally.
//!
//! Tokens are shared by every clone of a [`FirebaseAuth`], so the Firestore
//! client sees the same ID token the gate signed in with.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio::config::IdentityConfig;
use portfolio::{AuthError, IdentityProvider, UserRef};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::storage;
use crate::remote::RemoteError;

#[derive(Debug, Clone)]
struct Credentials {
    id_token: String,
    refresh_token: String,
    user: UserRef,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
}

/// Securetoken answers in snake_case.
#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

fn user_ref(uid: String, email: String, display_name: Option<String>) -> UserRef {
    UserRef {
        uid,
        email,
        display_name: display_name.filter(|n| !n.trim().is_empty()),
    }
}

/// Map an Identity Toolkit error message to an [`AuthError`].
///
/// Messages look like `INVALID_PASSWORD` or
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been…`.
fn map_error(message: &str) -> AuthError {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL"
        | "MISSING_PASSWORD" | "USER_DISABLED" => AuthError::InvalidCredentials,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        _ => AuthError::Provider(message.to_string()),
    }
}

/// Firebase Auth client. Cheap to clone; clones share tokens.
#[derive(Clone)]
pub struct FirebaseAuth {
    http: Client,
    config: IdentityConfig,
    credentials: Rc<RefCell<Option<Credentials>>>,
}

impl FirebaseAuth {
    pub fn new(http: Client, config: IdentityConfig) -> Self {
        Self {
            http,
            config,
            credentials: Rc::default(),
        }
    }

    /// ID token of the signed-in user, for authorizing database writes.
    pub fn id_token(&self) -> Option<String> {
        self.credentials
            .borrow()
            .as_ref()
            .map(|c| c.id_token.clone())
    }

    /// Exchange the refresh token for a fresh ID token.
    pub async fn refresh_id_token(&self) -> Result<String, AuthError> {
        let refresh_token = self
            .credentials
            .borrow()
            .as_ref()
            .map(|c| c.refresh_token.clone())
            .ok_or_else(|| AuthError::Provider("no session to refresh".to_string()))?;

        let tokens = self.exchange_refresh_token(&refresh_token).await?;
        storage::save(&tokens.refresh_token);
        if let Some(credentials) = self.credentials.borrow_mut().as_mut() {
            credentials.id_token = tokens.id_token.clone();
            credentials.refresh_token = tokens.refresh_token;
        }
        tracing::debug!("refreshed ID token");
        Ok(tokens.id_token)
    }

    fn remember(&self, credentials: Credentials) {
        storage::save(&credentials.refresh_token);
        *self.credentials.borrow_mut() = Some(credentials);
    }

    fn forget(&self) {
        storage::clear();
        self.credentials.borrow_mut().take();
    }

    fn identity_url(&self, method: &str) -> String {
        format!(
            "{}/accounts:{method}?key={}",
            self.config.auth_base, self.config.api_key
        )
    }

    async fn read<T: DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, AuthError> {
        let response = response.map_err(|e| AuthError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match RemoteError::parse(&text) {
                Some(err) => map_error(&err.message),
                None => AuthError::Provider(format!("HTTP {status}")),
            });
        }
        serde_json::from_str(&text).map_err(|e| AuthError::Provider(e.to_string()))
    }

    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let url = format!("{}/token?key={}", self.config.token_base, self.config.api_key);
        let response = self
            .http
            .post(url)
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await;
        Self::read(response).await
    }

    async fn lookup(&self, id_token: &str) -> Result<UserRef, AuthError> {
        let response = self
            .http
            .post(self.identity_url("lookup"))
            .json(&LookupRequest { id_token })
            .send()
            .await;
        let body: LookupResponse = Self::read(response).await?;
        body.users
            .into_iter()
            .next()
            .map(|u| user_ref(u.local_id, u.email, u.display_name))
            .ok_or_else(|| AuthError::Provider("USER_NOT_FOUND".to_string()))
    }
}

impl IdentityProvider for FirebaseAuth {
    async fn current_user(&self) -> Result<Option<UserRef>, AuthError> {
        let cached = self.credentials.borrow().as_ref().map(|c| c.user.clone());
        if let Some(user) = cached {
            return Ok(Some(user));
        }

        let Some(refresh_token) = storage::load() else {
            return Ok(None);
        };

        let restored = async {
            let tokens = self.exchange_refresh_token(&refresh_token).await?;
            let user = self.lookup(&tokens.id_token).await?;
            Ok::<_, AuthError>(Credentials {
                id_token: tokens.id_token,
                refresh_token: tokens.refresh_token,
                user,
            })
        };

        match restored.await {
            Ok(credentials) => {
                let user = credentials.user.clone();
                self.remember(credentials);
                tracing::info!("restored session for {}", user.email);
                Ok(Some(user))
            }
            Err(AuthError::Network(e)) => Err(AuthError::Network(e)),
            Err(err) => {
                tracing::debug!("stored session is no longer valid: {err}");
                self.forget();
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserRef, AuthError> {
        let response = self
            .http
            .post(self.identity_url("signInWithPassword"))
            .json(&SignInRequest {
                email: email.trim(),
                password,
                return_secure_token: true,
            })
            .send()
            .await;
        let body: SignInResponse = Self::read(response).await?;

        let user = user_ref(body.local_id, body.email, body.display_name);
        self.remember(Credentials {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            user: user.clone(),
        });
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.forget();
        Ok(())
    }
}
