//! Test doubles for the service seams.

use std::cell::RefCell;
use std::rc::Rc;

use futures::stream::{self, LocalBoxStream, StreamExt};

use crate::error::UploadError;
use crate::media::{Bucket, MediaFile};
use crate::models::UploadResult;
use crate::progress::UploadEvent;
use crate::services::AssetUploader;

pub fn image(name: &str, len: usize) -> MediaFile {
    MediaFile::new(name, Some("image/png".to_string()), vec![1u8; len])
}

/// Uploader that answers from a script and records every call.
///
/// Each upload emits the configured progress ticks, then finishes with
/// `https://cdn.test/<bucket>/<name>`, fails (`fail_on`), or just ends
/// without a terminal event (`stall_on`).
#[derive(Clone)]
pub struct FakeUploader {
    calls: Rc<RefCell<Vec<(String, Bucket)>>>,
    ticks: Vec<u8>,
    fail_on: Vec<String>,
    stall_on: Vec<String>,
}

impl FakeUploader {
    pub fn new() -> Self {
        Self {
            calls: Rc::default(),
            ticks: vec![0, 50],
            fail_on: Vec::new(),
            stall_on: Vec::new(),
        }
    }

    pub fn with_ticks(mut self, ticks: &[u8]) -> Self {
        self.ticks = ticks.to_vec();
        self
    }

    pub fn fail_on(mut self, name: &str) -> Self {
        self.fail_on.push(name.to_string());
        self
    }

    pub fn stall_on(mut self, name: &str) -> Self {
        self.stall_on.push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Bucket)> {
        self.calls.borrow().clone()
    }
}

impl AssetUploader for FakeUploader {
    fn upload(&self, file: &MediaFile, bucket: Bucket) -> LocalBoxStream<'static, UploadEvent> {
        self.calls.borrow_mut().push((file.name.clone(), bucket));

        let mut events: Vec<UploadEvent> =
            self.ticks.iter().copied().map(UploadEvent::Progress).collect();
        if self.fail_on.contains(&file.name) {
            events.push(UploadEvent::Failed(UploadError::Rejected(
                "scripted failure".to_string(),
            )));
        } else if !self.stall_on.contains(&file.name) {
            let folder = match bucket {
                Bucket::Certificates => "certificates",
                Bucket::Projects => "projects",
            };
            events.push(UploadEvent::Finished(UploadResult::new(format!(
                "https://cdn.test/{folder}/{}",
                file.name
            ))));
        }
        stream::iter(events).boxed_local()
    }
}
