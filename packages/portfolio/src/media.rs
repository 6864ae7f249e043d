//! # Media files and the checks they must pass before upload
//!
//! A [`MediaFile`] is a picked file held in memory: name, declared media type,
//! and bytes. [`MediaFile::check`] enforces the constraints every upload target
//! shares (non-empty, allowed type, at most [`MAX_UPLOAD_BYTES`]); drafts call
//! it from `validate` so nothing oversized or mistyped ever reaches the
//! network. Forms also call it at pick time to reject a file immediately.

use bytes::Bytes;

use crate::config::UploadsConfig;
use crate::error::ValidationError;

/// Largest file accepted by any form: 2 MiB.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

const PDF: &str = "application/pdf";

/// A file picked by the user, held entirely in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl MediaFile {
    /// Build a file, guessing the media type from the name when the platform
    /// did not report one.
    pub fn new(name: impl Into<String>, media_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let media_type = media_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&name)
                    .first_raw()
                    .unwrap_or("application/octet-stream")
                    .to_string()
            })
            .to_ascii_lowercase();
        Self {
            name,
            media_type,
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF
    }

    /// Check this file against `policy`. `field` names the form field in the
    /// error message.
    pub fn check(&self, policy: AcceptPolicy, field: &str) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyFile {
                field: field.to_string(),
            });
        }
        if !policy.allows(self) {
            return Err(ValidationError::UnsupportedType {
                field: field.to_string(),
                allowed: policy.describe().to_string(),
            });
        }
        if self.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge {
                field: field.to_string(),
            });
        }
        Ok(())
    }
}

/// Which media types a file input accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceptPolicy {
    Images,
    ImagesOrPdf,
}

impl AcceptPolicy {
    pub fn allows(self, file: &MediaFile) -> bool {
        match self {
            AcceptPolicy::Images => file.is_image(),
            AcceptPolicy::ImagesOrPdf => file.is_image() || file.is_pdf(),
        }
    }

    /// Value for the HTML `accept` attribute.
    pub fn accept_attr(self) -> &'static str {
        match self {
            AcceptPolicy::Images => "image/*",
            AcceptPolicy::ImagesOrPdf => "application/pdf,image/*",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            AcceptPolicy::Images => "image",
            AcceptPolicy::ImagesOrPdf => "image and PDF",
        }
    }
}

/// Upload destination registered with the image host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Certificates,
    Projects,
}

impl Bucket {
    /// Upload preset name for this bucket.
    pub fn preset(self, uploads: &UploadsConfig) -> &str {
        match self {
            Bucket::Certificates => &uploads.certificates_preset,
            Bucket::Projects => &uploads.projects_preset,
        }
    }
}
