//! Error taxonomy shared by the workflow and the service clients.
//!
//! The `Display` text of each variant is what the forms show inline.

use thiserror::Error;

/// A draft or file failed a local check. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(String),
    #[error("{field}: only {allowed} files are allowed")]
    UnsupportedType { field: String, allowed: String },
    #[error("{field} must be under 2MB")]
    TooLarge { field: String },
    #[error("{field} is empty")]
    EmptyFile { field: String },
}

/// An upload to the image host failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Network error while uploading: {0}")]
    Network(String),
    #[error("Upload rejected: {0}")]
    Rejected(String),
    #[error("File is too large for the image host")]
    PayloadTooLarge,
}

/// The document database refused or failed a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("Could not reach the database: {0}")]
    Network(String),
    #[error("Database rejected the write: {0}")]
    Rejected(String),
    #[error("Not signed in")]
    Unauthenticated,
}

/// Identity provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Too many attempts, try again later")]
    TooManyAttempts,
    #[error("Could not reach the sign-in service: {0}")]
    Network(String),
    #[error("Sign-in failed: {0}")]
    Provider(String),
}

/// Anything that can stop a submission after it has started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
