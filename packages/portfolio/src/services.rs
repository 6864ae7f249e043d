//! # Seams to the hosted services
//!
//! The workflow and the Session Gate only ever talk to these traits. The `api`
//! crate implements them over HTTP; [`crate::MemoryStore`] and the test doubles
//! implement them in memory.
//!
//! Futures and streams are not required to be `Send`: the dashboard runs on a
//! single cooperative event loop.

use futures::stream::LocalBoxStream;

use crate::error::{AuthError, PersistError};
use crate::media::{Bucket, MediaFile};
use crate::models::{DocumentRef, NewDocument};
use crate::progress::UploadEvent;
use crate::session::UserRef;

/// Uploads one file to the image host.
pub trait AssetUploader {
    /// Start uploading `file` into `bucket`. Nothing happens until the stream
    /// is polled; it ends after its first terminal event.
    fn upload(&self, file: &MediaFile, bucket: Bucket) -> LocalBoxStream<'static, UploadEvent>;
}

/// Creates documents in named collections.
pub trait DocumentStore {
    fn create(
        &self,
        doc: NewDocument,
    ) -> impl std::future::Future<Output = Result<DocumentRef, PersistError>>;
}

/// Authenticates administrators.
pub trait IdentityProvider {
    /// The user of the current (possibly restored) session, if any.
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<UserRef>, AuthError>>;
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<UserRef, AuthError>>;
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), AuthError>>;
}
