//! # Portfolio — domain core of the admin dashboard
//!
//! Everything in here is platform-neutral: no UI, no HTTP. The `api` crate
//! plugs real services into the traits in [`services`], the `ui` crate drives
//! [`submission::Form`] from its components, and the `web` crate asks
//! [`routes::authorize`] what to render on every navigation.

pub mod config;
pub mod drafts;
pub mod error;
pub mod media;
pub mod models;
pub mod progress;
pub mod routes;
pub mod services;
pub mod session;
pub mod submission;

mod memory;
pub use memory::{MemoryStore, StoredDocument};

#[cfg(test)]
mod testing;

pub use config::AdminConfig;
pub use drafts::{
    CertificateDraft, LicenseAssets, LicenseCertificateDraft, ProjectDraft, ProjectType,
    Visibility, TECHNOLOGY_OPTIONS,
};
pub use error::{AuthError, PersistError, SubmitError, UploadError, ValidationError};
pub use media::{AcceptPolicy, Bucket, MediaFile, MAX_UPLOAD_BYTES};
pub use models::{DocumentRef, FieldValue, NewDocument, Record, UploadResult};
pub use progress::{ProgressAggregate, UploadEvent};
pub use routes::{authorize, FormKind, RouteDecision, Target, View};
pub use services::{AssetUploader, DocumentStore, IdentityProvider};
pub use session::{Session, UserRef};
pub use submission::{AssetKey, Attempt, BeginError, Form, FormStatus, Outcome, RecordDraft};
