//! # Cloudinary upload client
//!
//! Unsigned uploads: a multipart `POST {base}/v1_1/{cloud}/{resource}/upload`
//! with the fields `file`, `upload_preset`, `cloud_name`. Images go to the
//! `image` resource, PDFs to `auto`. The answer carries `secure_url` on
//! success and `{"error": {"message": …}}` on failure.
//!
//! Progress on native targets counts the file bytes the request body has
//! handed to the transport. The browser's fetch API reports no upload
//! progress, so wasm builds only emit the initial `Progress(0)`.

use futures::channel::mpsc;
use futures::future;
use futures::stream::{self, LocalBoxStream, StreamExt};
use portfolio::config::UploadsConfig;
use portfolio::{AssetUploader, Bucket, MediaFile, UploadError, UploadEvent, UploadResult};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::remote::RemoteError;

#[cfg(not(target_arch = "wasm32"))]
const CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Clone)]
pub struct CloudinaryUploader {
    http: Client,
    config: UploadsConfig,
}

impl CloudinaryUploader {
    pub fn new(http: Client, config: UploadsConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, file: &MediaFile) -> String {
        let resource = if file.is_pdf() { "auto" } else { "image" };
        format!(
            "{}/v1_1/{}/{resource}/upload",
            self.config.base_url, self.config.cloud_name
        )
    }

    fn form(
        &self,
        file: &MediaFile,
        bucket: Bucket,
        progress: mpsc::UnboundedSender<u8>,
    ) -> Result<Form, UploadError> {
        let part = file_part(file, progress)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| UploadError::Rejected(e.to_string()))?;
        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", bucket.preset(&self.config).to_string())
            .text("cloud_name", self.config.cloud_name.clone()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn file_part(file: &MediaFile, progress: mpsc::UnboundedSender<u8>) -> Part {
    let total = file.len() as u64;
    let chunks: Vec<bytes::Bytes> = (0..file.len())
        .step_by(CHUNK_SIZE)
        .map(|start| file.bytes.slice(start..(start + CHUNK_SIZE).min(file.len())))
        .collect();

    let mut sent = 0u64;
    let body = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        let _ = progress.unbounded_send(portfolio::progress::percent(sent, total));
        Ok::<_, std::io::Error>(chunk)
    });
    Part::stream_with_length(reqwest::Body::wrap_stream(body), total)
}

#[cfg(target_arch = "wasm32")]
fn file_part(file: &MediaFile, _progress: mpsc::UnboundedSender<u8>) -> Part {
    Part::bytes(file.bytes.to_vec())
}

async fn send(request: reqwest::RequestBuilder) -> Result<UploadResult, UploadError> {
    let response = request
        .send()
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;
    let status = response.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return Err(UploadError::PayloadTooLarge);
    }
    let text = response
        .text()
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;

    if let Some(err) = RemoteError::parse(&text) {
        return Err(UploadError::Rejected(err.message));
    }
    if !status.is_success() {
        return Err(UploadError::Rejected(format!("HTTP {status}")));
    }
    let body: UploadResponse =
        serde_json::from_str(&text).map_err(|e| UploadError::Rejected(e.to_string()))?;
    body.secure_url
        .map(UploadResult::new)
        .ok_or_else(|| UploadError::Rejected("response has no secure_url".to_string()))
}

/// Keep progress non-decreasing and end right after the first terminal event.
fn settle(
    events: impl futures::Stream<Item = UploadEvent> + 'static,
) -> LocalBoxStream<'static, UploadEvent> {
    stream::unfold(Some((events.boxed_local(), 0u8)), |state| async move {
        let (mut events, mut last) = state?;
        loop {
            match events.next().await? {
                UploadEvent::Progress(pct) if pct < last => continue,
                UploadEvent::Progress(pct) => {
                    last = pct;
                    return Some((UploadEvent::Progress(pct), Some((events, last))));
                }
                terminal => return Some((terminal, None)),
            }
        }
    })
    .boxed_local()
}

impl AssetUploader for CloudinaryUploader {
    fn upload(&self, file: &MediaFile, bucket: Bucket) -> LocalBoxStream<'static, UploadEvent> {
        let (progress_tx, progress_rx) = mpsc::unbounded();
        let request = self
            .form(file, bucket, progress_tx)
            .map(|form| self.http.post(self.endpoint(file)).multipart(form));
        let name = file.name.clone();

        let terminal = stream::once(async move {
            let result = match request {
                Ok(request) => send(request).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(url) => {
                    tracing::debug!("uploaded {name} to {url}");
                    UploadEvent::Finished(url)
                }
                Err(err) => {
                    tracing::warn!("upload of {name} failed: {err}");
                    UploadEvent::Failed(err)
                }
            }
        });

        let progress = progress_rx.map(UploadEvent::Progress);
        let started = stream::once(future::ready(UploadEvent::Progress(0)));
        settle(started.chain(stream::select(progress, terminal)))
    }
}
