//! # API crate — HTTP clients for the hosted services
//!
//! The dashboard has no backend of its own. Everything it persists goes to
//! three hosted services, and this crate holds one client per service, each
//! implementing the matching seam from `portfolio::services`.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Firebase Auth REST client ([`FirebaseAuth`]) and the [`SessionGate`] that broadcasts session changes |
//! | [`db`] | Firestore REST client ([`FirestoreClient`]): document creation with server timestamps |
//! | [`upload`] | Cloudinary unsigned-upload client ([`CloudinaryUploader`]) with progress events |
//!
//! [`Services`] bundles one of each, built from an [`AdminConfig`]. The UI
//! provides it once as context.

pub mod auth;
pub mod db;
mod remote;
pub mod upload;

pub use auth::{FirebaseAuth, SessionGate, SessionStream};
pub use db::FirestoreClient;
pub use upload::CloudinaryUploader;

use portfolio::AdminConfig;

/// One client per hosted service, sharing the signed-in user's tokens.
#[derive(Clone)]
pub struct Services {
    pub gate: SessionGate<FirebaseAuth>,
    pub store: FirestoreClient,
    pub uploader: CloudinaryUploader,
}

impl Services {
    pub fn new(config: &AdminConfig) -> Self {
        let missing = config.missing();
        if !missing.is_empty() {
            tracing::warn!("admin config is missing: {}", missing.join(", "));
        }

        let http = reqwest::Client::new();
        let auth = FirebaseAuth::new(http.clone(), config.identity.clone());
        Self {
            store: FirestoreClient::new(http.clone(), config.database.clone(), auth.clone()),
            uploader: CloudinaryUploader::new(http, config.uploads.clone()),
            gate: SessionGate::new(auth),
        }
    }
}
