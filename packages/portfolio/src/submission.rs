//! # Record submission workflow
//!
//! Every entry form runs the same sequence: edit a draft locally, validate on
//! submit, upload the draft's files, then write exactly one document. The
//! per-variant parts live behind [`RecordDraft`]; the sequencing lives here.
//!
//! ## Lifecycle
//!
//! | Step | Method | Network |
//! |------|--------|---------|
//! | Edit fields | [`Form::edit`] | none |
//! | Submit | [`Form::begin`] validates and marks the form as submitting | none |
//! | Upload + write | [`Attempt::run`] | uploads, then one database write |
//! | Settle | [`Form::finish`] | none |
//!
//! `begin` refuses while an attempt is in flight, so one form instance never
//! issues concurrent duplicate writes. A failed upload aborts the attempt and
//! leaves already-uploaded files where they are. A failed write keeps the draft
//! and the uploaded URLs, so the next submit only repeats the write, unless a
//! file field was edited in between.

use bytes::Bytes;
use futures::StreamExt;

use crate::error::{SubmitError, UploadError, ValidationError};
use crate::media::{Bucket, MediaFile};
use crate::models::{DocumentRef, Record, UploadResult};
use crate::progress::{ProgressAggregate, UploadEvent};
use crate::routes::FormKind;
use crate::services::{AssetUploader, DocumentStore};

/// Identity of one attached file, used to tell whether uploaded URLs still
/// correspond to the draft. Two keys are equal only when the contents are.
#[derive(Clone, PartialEq, Eq)]
pub struct AssetKey {
    pub name: String,
    pub media_type: String,
    content: Bytes,
}

impl AssetKey {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl std::fmt::Debug for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetKey")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.len())
            .finish()
    }
}

impl From<&MediaFile> for AssetKey {
    fn from(file: &MediaFile) -> Self {
        Self {
            name: file.name.clone(),
            media_type: file.media_type.clone(),
            content: file.bytes.clone(),
        }
    }
}

/// The per-variant half of the workflow.
pub trait RecordDraft: Clone + Default {
    /// URLs produced by this draft's uploads.
    type Assets: Clone + std::fmt::Debug;

    const KIND: FormKind;

    /// Shown after a successful write.
    const SUCCESS_MESSAGE: &'static str;

    /// Required fields and file constraints.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Keys of every attached file, in upload order.
    fn asset_key(&self) -> Vec<AssetKey>;

    /// Upload every attached file. Called only after `validate` passed.
    fn upload_assets<U: AssetUploader>(
        &self,
        uploader: &U,
        on_progress: &mut dyn FnMut(u8),
    ) -> impl std::future::Future<Output = Result<Self::Assets, UploadError>>;

    /// Build the record from the draft and its uploaded URLs.
    fn into_record(self, assets: Self::Assets) -> Record;
}

/// Drive one upload stream to completion, forwarding progress ticks.
pub async fn upload_one<U: AssetUploader>(
    uploader: &U,
    file: &MediaFile,
    bucket: Bucket,
    on_progress: &mut dyn FnMut(u8),
) -> Result<UploadResult, UploadError> {
    let mut events = uploader.upload(file, bucket);
    while let Some(event) = events.next().await {
        match event {
            UploadEvent::Progress(pct) => on_progress(pct),
            UploadEvent::Finished(url) => {
                on_progress(100);
                return Ok(url);
            }
            UploadEvent::Failed(err) => return Err(err),
        }
    }
    Err(UploadError::Network("upload ended without a result".to_string()))
}

/// Upload all `files` concurrently, reporting the mean progress across them.
/// Returns URLs in the order of `files`. The first failure aborts the batch.
pub async fn upload_all<U: AssetUploader>(
    uploader: &U,
    files: &[MediaFile],
    bucket: Bucket,
    on_progress: &mut dyn FnMut(u8),
) -> Result<Vec<UploadResult>, UploadError> {
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let streams = files
        .iter()
        .enumerate()
        .map(|(index, file)| uploader.upload(file, bucket).map(move |event| (index, event)));
    let mut merged = futures::stream::select_all(streams);

    let mut aggregate = ProgressAggregate::new(files.len());
    let mut urls: Vec<Option<UploadResult>> = vec![None; files.len()];
    let mut remaining = files.len();

    while let Some((index, event)) = merged.next().await {
        match event {
            UploadEvent::Progress(pct) => on_progress(aggregate.update(index, pct)),
            UploadEvent::Finished(url) => {
                urls[index] = Some(url);
                on_progress(aggregate.update(index, 100));
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }
            UploadEvent::Failed(err) => {
                tracing::warn!("upload {} of {} failed: {err}", index + 1, files.len());
                return Err(err);
            }
        }
    }

    urls.into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| UploadError::Network("upload ended without a result".to_string()))
}

/// What the form should display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting {
        progress: u8,
    },
    Succeeded(String),
    Failed(String),
}

/// Why [`Form::begin`] did not start an attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BeginError {
    InFlight,
    Invalid(ValidationError),
}

/// One entry form: its draft, its status, and any reusable uploads.
#[derive(Clone, Debug)]
pub struct Form<D: RecordDraft> {
    draft: D,
    status: FormStatus,
    reusable: Option<(Vec<AssetKey>, D::Assets)>,
}

impl<D: RecordDraft> Default for Form<D> {
    fn default() -> Self {
        Self {
            draft: D::default(),
            status: FormStatus::Idle,
            reusable: None,
        }
    }
}

impl<D: RecordDraft> Form<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, FormStatus::Submitting { .. })
    }

    /// Whether the next attempt can skip uploading.
    pub fn has_reusable_assets(&self) -> bool {
        self.reusable.is_some()
    }

    /// Apply an edit to the draft. Changing any attached file discards URLs
    /// kept from a failed write.
    pub fn edit(&mut self, f: impl FnOnce(&mut D)) {
        let before = self.draft.asset_key();
        f(&mut self.draft);
        if self.draft.asset_key() != before {
            self.reusable = None;
        }
    }

    /// Show a rejected file pick (or any other local error). Ignored while an
    /// attempt is in flight: the status is what keeps `begin` from starting a
    /// second one.
    pub fn reject(&mut self, err: ValidationError) {
        if self.is_submitting() {
            tracing::warn!("{:?} form is submitting, ignoring: {err}", D::KIND);
            return;
        }
        self.status = FormStatus::Failed(err.to_string());
    }

    pub fn set_progress(&mut self, progress: u8) {
        if self.is_submitting() {
            self.status = FormStatus::Submitting { progress };
        }
    }

    /// Validate and start an attempt.
    pub fn begin(&mut self) -> Result<Attempt<D>, BeginError> {
        if self.is_submitting() {
            return Err(BeginError::InFlight);
        }
        if let Err(err) = self.draft.validate() {
            self.status = FormStatus::Failed(err.to_string());
            return Err(BeginError::Invalid(err));
        }

        let key = self.draft.asset_key();
        let reusable = self
            .reusable
            .as_ref()
            .filter(|(k, _)| *k == key)
            .map(|(_, assets)| assets.clone());
        self.status = FormStatus::Submitting { progress: 0 };

        Ok(Attempt {
            draft: self.draft.clone(),
            key,
            reusable,
        })
    }

    /// Settle an attempt started by [`Form::begin`].
    pub fn finish(&mut self, outcome: Outcome<D>) {
        match outcome.result {
            Ok(doc) => {
                tracing::info!("created {}/{}", doc.collection, doc.id);
                self.draft = D::default();
                self.reusable = None;
                self.status = FormStatus::Succeeded(D::SUCCESS_MESSAGE.to_string());
            }
            Err(err) => {
                tracing::error!("{:?} submission failed: {err}", D::KIND);
                self.reusable = match (&err, outcome.assets) {
                    (SubmitError::Persist(_), Some(assets))
                        if self.draft.asset_key() == outcome.key =>
                    {
                        Some((outcome.key, assets))
                    }
                    _ => None,
                };
                self.status = FormStatus::Failed(err.to_string());
            }
        }
    }
}

/// A validated snapshot of a draft, ready to upload and write.
#[derive(Clone, Debug)]
pub struct Attempt<D: RecordDraft> {
    draft: D,
    key: Vec<AssetKey>,
    reusable: Option<D::Assets>,
}

/// Result of [`Attempt::run`], to be passed to [`Form::finish`].
#[derive(Clone, Debug)]
pub struct Outcome<D: RecordDraft> {
    pub result: Result<DocumentRef, SubmitError>,
    key: Vec<AssetKey>,
    assets: Option<D::Assets>,
}

impl<D: RecordDraft> Attempt<D> {
    /// Upload (unless a previous attempt already did) and write the record.
    pub async fn run<U, S>(
        self,
        uploader: &U,
        store: &S,
        mut on_progress: impl FnMut(u8),
    ) -> Outcome<D>
    where
        U: AssetUploader,
        S: DocumentStore,
    {
        let assets = match self.reusable {
            Some(assets) => {
                tracing::debug!("reusing uploads from the previous attempt");
                on_progress(100);
                assets
            }
            None => match self.draft.upload_assets(uploader, &mut on_progress).await {
                Ok(assets) => assets,
                Err(err) => {
                    return Outcome {
                        result: Err(err.into()),
                        key: self.key,
                        assets: None,
                    }
                }
            },
        };

        let document = self.draft.into_record(assets.clone()).to_document();
        let result = store.create(document).await.map_err(SubmitError::from);
        Outcome {
            result,
            key: self.key,
            assets: Some(assets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::{CertificateDraft, LicenseCertificateDraft, ProjectDraft};
    use crate::models::FieldValue;
    use crate::testing::{image, FakeUploader};
    use crate::MemoryStore;

    fn certificate_draft() -> CertificateDraft {
        CertificateDraft {
            title: "React (Basic)".into(),
            issuer: "HackerRank".into(),
            icon: Some(image("react.png", 50 * 1024)),
            ..Default::default()
        }
    }

    async fn submit<D: RecordDraft>(
        form: &mut Form<D>,
        uploader: &FakeUploader,
        store: &MemoryStore,
    ) -> Vec<u8> {
        let mut ticks = Vec::new();
        let Ok(attempt) = form.begin() else {
            return ticks;
        };
        let outcome = attempt.run(uploader, store, |p| ticks.push(p)).await;
        form.finish(outcome);
        ticks
    }

    #[tokio::test]
    async fn test_certificate_scenario() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());

        submit(&mut form, &uploader, &store).await;

        assert_eq!(uploader.calls(), vec![("react.png".to_string(), Bucket::Certificates)]);
        let docs = store.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].reference.collection, "certificates");
        assert_eq!(
            docs[0].fields.get("icon"),
            Some(&FieldValue::from("https://cdn.test/certificates/react.png"))
        );
        assert_eq!(docs[0].fields.get("date"), Some(&FieldValue::Null));
        assert_eq!(form.draft(), &CertificateDraft::default());
        assert!(matches!(form.status(), FormStatus::Succeeded(_)));
    }

    #[tokio::test]
    async fn test_empty_required_field_never_writes() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| {
            *d = certificate_draft();
            d.issuer = "   ".into();
        });

        for _ in 0..5 {
            submit(&mut form, &uploader, &store).await;
        }

        assert!(uploader.calls().is_empty());
        assert!(store.documents().is_empty());
        assert!(matches!(form.status(), FormStatus::Failed(_)));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_wrong_type_and_oversized_make_no_calls() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();

        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| {
            *d = certificate_draft();
            d.icon = Some(MediaFile::new("notes.txt", Some("text/plain".into()), vec![1u8; 10]));
        });
        assert!(matches!(
            form.begin(),
            Err(BeginError::Invalid(ValidationError::UnsupportedType { .. }))
        ));

        form.edit(|d| d.icon = Some(image("huge.png", crate::MAX_UPLOAD_BYTES + 1)));
        assert!(matches!(
            form.begin(),
            Err(BeginError::Invalid(ValidationError::TooLarge { .. }))
        ));

        assert!(uploader.calls().is_empty());
        assert!(store.documents().is_empty());
    }

    #[tokio::test]
    async fn test_begin_rejects_while_in_flight() {
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());
        let _attempt = form.begin().unwrap();
        assert_eq!(form.begin().unwrap_err(), BeginError::InFlight);
    }

    #[tokio::test]
    async fn test_rejected_pick_during_submit_keeps_attempt_exclusive() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());

        let first = form.begin().unwrap();
        form.reject(ValidationError::TooLarge { field: "Icon".into() });
        assert!(form.is_submitting());
        assert_eq!(form.begin().unwrap_err(), BeginError::InFlight);

        form.set_progress(40);
        assert_eq!(form.status(), &FormStatus::Submitting { progress: 40 });

        let outcome = first.run(&uploader, &store, |_| {}).await;
        form.finish(outcome);
        assert_eq!(store.documents().len(), 1);

        // Once settled, a bad pick shows again.
        form.reject(ValidationError::TooLarge { field: "Icon".into() });
        assert_eq!(
            form.status(),
            &FormStatus::Failed("Icon must be under 2MB".into())
        );
    }

    #[tokio::test]
    async fn test_license_second_upload_failure_writes_nothing() {
        let uploader = FakeUploader::new().fail_on("aws.png");
        let store = MemoryStore::new();
        let mut form = Form::<LicenseCertificateDraft>::new();
        form.edit(|d| {
            d.certificate_name = "Cloud Practitioner".into();
            d.institute_name = "Amazon".into();
            d.issue_date = "2025-06-01".into();
            d.file = Some(MediaFile::new("cert.pdf", None, vec![1u8; 2048]));
            d.issuer_icon = Some(image("aws.png", 1024));
        });

        let ticks = submit(&mut form, &uploader, &store).await;

        assert_eq!(
            uploader.calls(),
            vec![
                ("cert.pdf".to_string(), Bucket::Certificates),
                ("aws.png".to_string(), Bucket::Certificates),
            ]
        );
        assert!(store.documents().is_empty());
        assert!(!form.has_reusable_assets());
        assert_eq!(form.draft().certificate_name, "Cloud Practitioner");
        // The indicator restarts for the second file.
        let first_done = ticks.iter().position(|&p| p == 100).unwrap();
        assert!(ticks[first_done + 1..].contains(&0));
    }

    #[tokio::test]
    async fn test_persist_failure_retries_without_reupload() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());

        store.set_unavailable(true);
        submit(&mut form, &uploader, &store).await;
        assert!(matches!(form.status(), FormStatus::Failed(_)));
        assert_eq!(form.draft().title, "React (Basic)");
        assert!(form.has_reusable_assets());
        assert_eq!(uploader.calls().len(), 1);

        // Text edits keep the uploaded icon.
        form.edit(|d| d.link = "https://hackerrank.com/cert".into());
        store.set_unavailable(false);
        submit(&mut form, &uploader, &store).await;
        assert_eq!(uploader.calls().len(), 1);
        assert_eq!(store.documents().len(), 1);
        assert!(matches!(form.status(), FormStatus::Succeeded(_)));
    }

    #[tokio::test]
    async fn test_file_edit_after_failed_write_uploads_again() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());

        store.set_unavailable(true);
        submit(&mut form, &uploader, &store).await;
        form.edit(|d| d.icon = Some(image("react-v2.png", 4096)));
        assert!(!form.has_reusable_assets());

        store.set_unavailable(false);
        submit(&mut form, &uploader, &store).await;
        assert_eq!(uploader.calls().len(), 2);
        assert_eq!(
            store.documents()[0].fields.get("icon"),
            Some(&FieldValue::from("https://cdn.test/certificates/react-v2.png"))
        );
    }

    #[tokio::test]
    async fn test_same_name_and_size_replacement_uploads_again() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<CertificateDraft>::new();
        form.edit(|d| *d = certificate_draft());

        store.set_unavailable(true);
        submit(&mut form, &uploader, &store).await;
        assert!(form.has_reusable_assets());

        // Same name, type and length as the first icon, different pixels.
        form.edit(|d| {
            d.icon = Some(MediaFile::new(
                "react.png",
                Some("image/png".into()),
                vec![9u8; 50 * 1024],
            ))
        });
        assert!(!form.has_reusable_assets());

        store.set_unavailable(false);
        submit(&mut form, &uploader, &store).await;
        assert_eq!(uploader.calls().len(), 2);
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn test_asset_key_compares_contents() {
        let a = image("react.png", 16);
        let same = a.clone();
        let other = MediaFile::new("react.png", Some(a.media_type.clone()), vec![9u8; 16]);

        assert_eq!(AssetKey::from(&a), AssetKey::from(&same));
        assert_ne!(AssetKey::from(&a), AssetKey::from(&other));
        assert_eq!(AssetKey::from(&other).len(), 16);
    }

    #[tokio::test]
    async fn test_project_uploads_all_images() {
        let uploader = FakeUploader::new();
        let store = MemoryStore::new();
        let mut form = Form::<ProjectDraft>::new();
        form.edit(|d| {
            d.project_name = "Folio".into();
            d.description = "Portfolio admin".into();
            d.images = vec![image("a.png", 10), image("b.png", 10), image("c.png", 10)];
        });

        let ticks = submit(&mut form, &uploader, &store).await;

        assert_eq!(uploader.calls().len(), 3);
        assert!(uploader.calls().iter().all(|(_, b)| *b == Bucket::Projects));
        assert_eq!(ticks.last(), Some(&100));
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        let docs = store.documents();
        assert_eq!(
            docs[0].fields.get("images"),
            Some(&FieldValue::Array(vec![
                "https://cdn.test/projects/a.png".into(),
                "https://cdn.test/projects/b.png".into(),
                "https://cdn.test/projects/c.png".into(),
            ]))
        );
    }

    #[tokio::test]
    async fn test_upload_all_mean_progress() {
        let uploader = FakeUploader::new().with_ticks(&[30]).stall_on("b.png").stall_on("c.png");
        let files = vec![image("a.png", 10), image("b.png", 10), image("c.png", 10)];
        let mut ticks = Vec::new();

        // b and c never finish, so the merged stream ends without all URLs.
        let result = upload_all(&uploader, &files, Bucket::Projects, &mut |p| ticks.push(p)).await;

        assert!(result.is_err());
        assert_eq!(uploader.calls().len(), 3);
        assert_eq!(ticks.first(), Some(&10));
    }

    #[tokio::test]
    async fn test_project_failure_aborts() {
        let uploader = FakeUploader::new().fail_on("b.png");
        let store = MemoryStore::new();
        let mut form = Form::<ProjectDraft>::new();
        form.edit(|d| {
            d.project_name = "Folio".into();
            d.description = "Portfolio admin".into();
            d.images = vec![image("a.png", 10), image("b.png", 10)];
        });

        submit(&mut form, &uploader, &store).await;

        assert!(store.documents().is_empty());
        assert_eq!(form.draft().images.len(), 2);
    }
}
