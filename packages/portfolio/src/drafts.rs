//! Editable drafts behind the three entry forms.
//!
//! Field names follow the form inputs. A draft is plain data until submit;
//! [`RecordDraft`] turns it into a validated, uploaded [`Record`].

use crate::error::{UploadError, ValidationError};
use crate::media::{AcceptPolicy, Bucket, MediaFile};
use crate::models::{Certificate, LicenseCertificate, Project, Record, UploadResult};
use crate::routes::FormKind;
use crate::services::AssetUploader;
use crate::submission::{upload_all, upload_one, AssetKey, RecordDraft};

/// Technologies offered as checkboxes on the project form.
pub const TECHNOLOGY_OPTIONS: &[&str] = &[
    "React",
    "Node.js",
    "JavaScript",
    "TypeScript",
    "Next.js",
    "Vue.js",
    "Angular",
    "Postman",
    "vite",
    "Bootstrap",
    "MySQL",
    "Python",
    "XD",
    "Figma",
    "Java",
    "Firebase",
    "MongoDB",
    "Express",
    "HTML/CSS",
    "Tailwind CSS",
    "Redux",
];

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Public, Visibility::Private];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectType {
    #[default]
    FullStack,
    Frontend,
    Backend,
    Mobile,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::FullStack,
        ProjectType::Frontend,
        ProjectType::Backend,
        ProjectType::Mobile,
        ProjectType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::FullStack => "full-stack",
            ProjectType::Frontend => "frontend",
            ProjectType::Backend => "backend",
            ProjectType::Mobile => "mobile",
            ProjectType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectType::FullStack => "Full Stack",
            ProjectType::Frontend => "Frontend Development",
            ProjectType::Backend => "Backend Development",
            ProjectType::Mobile => "Mobile App",
            ProjectType::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificateDraft {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub link: String,
    pub icon: Option<MediaFile>,
}

impl RecordDraft for CertificateDraft {
    type Assets = UploadResult;

    const KIND: FormKind = FormKind::Certificate;
    const SUCCESS_MESSAGE: &'static str = "Certificate added successfully!";

    fn validate(&self) -> Result<(), ValidationError> {
        let Some(icon) = self.icon.as_ref().filter(|_| !blank(&self.title) && !blank(&self.issuer))
        else {
            return Err(ValidationError::MissingFields(
                "Title, issuer, and icon are required".to_string(),
            ));
        };
        icon.check(AcceptPolicy::Images, "Icon")
    }

    fn asset_key(&self) -> Vec<AssetKey> {
        self.icon.iter().map(AssetKey::from).collect()
    }

    async fn upload_assets<U: AssetUploader>(
        &self,
        uploader: &U,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<UploadResult, UploadError> {
        let Some(icon) = &self.icon else {
            return Err(UploadError::Rejected("no icon selected".to_string()));
        };
        upload_one(uploader, icon, Bucket::Certificates, on_progress).await
    }

    fn into_record(self, icon: UploadResult) -> Record {
        Record::Certificate(Certificate {
            title: self.title.trim().to_string(),
            issuer: self.issuer.trim().to_string(),
            date: optional(&self.date),
            icon,
            link: optional(&self.link),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LicenseCertificateDraft {
    pub certificate_name: String,
    pub institute_name: String,
    pub issue_date: String,
    pub credential_id: String,
    pub credential_url: String,
    pub file: Option<MediaFile>,
    pub issuer_icon: Option<MediaFile>,
}

/// Uploaded URLs of a license certificate: the certificate file, then the
/// issuer icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LicenseAssets {
    pub file: UploadResult,
    pub issuer_icon: UploadResult,
}

impl RecordDraft for LicenseCertificateDraft {
    type Assets = LicenseAssets;

    const KIND: FormKind = FormKind::LicenseCertificate;
    const SUCCESS_MESSAGE: &'static str = "License certificate uploaded successfully!";

    fn validate(&self) -> Result<(), ValidationError> {
        let texts_present = !blank(&self.certificate_name)
            && !blank(&self.institute_name)
            && !blank(&self.issue_date);
        match (&self.file, &self.issuer_icon) {
            (Some(file), Some(icon)) if texts_present => {
                file.check(AcceptPolicy::ImagesOrPdf, "Certificate file")?;
                icon.check(AcceptPolicy::Images, "Issuer icon")
            }
            _ => Err(ValidationError::MissingFields(
                "Please fill all required fields and select files.".to_string(),
            )),
        }
    }

    fn asset_key(&self) -> Vec<AssetKey> {
        self.file
            .iter()
            .chain(self.issuer_icon.iter())
            .map(AssetKey::from)
            .collect()
    }

    async fn upload_assets<U: AssetUploader>(
        &self,
        uploader: &U,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<LicenseAssets, UploadError> {
        let (Some(file), Some(icon)) = (&self.file, &self.issuer_icon) else {
            return Err(UploadError::Rejected("files not selected".to_string()));
        };
        let file = upload_one(uploader, file, Bucket::Certificates, on_progress).await?;
        on_progress(0);
        let issuer_icon = upload_one(uploader, icon, Bucket::Certificates, on_progress).await?;
        Ok(LicenseAssets { file, issuer_icon })
    }

    fn into_record(self, assets: LicenseAssets) -> Record {
        Record::LicenseCertificate(LicenseCertificate {
            title: self.certificate_name.trim().to_string(),
            issuer: self.institute_name.trim().to_string(),
            date: self.issue_date.trim().to_string(),
            file: assets.file,
            issuer_icon: assets.issuer_icon,
            link: optional(&self.credential_url),
            credential_id: optional(&self.credential_id),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub project_name: String,
    pub visibility: Visibility,
    pub created_date: String,
    pub technologies: Vec<String>,
    /// Text of the "add technology" input. Never written.
    pub new_technology: String,
    pub description: String,
    pub duration: String,
    pub project_type: ProjectType,
    pub company_project: bool,
    pub images: Vec<MediaFile>,
    pub github_url: String,
    pub live_url: String,
}

impl ProjectDraft {
    pub fn has_technology(&self, tech: &str) -> bool {
        self.technologies.iter().any(|t| t == tech)
    }

    /// Add `tech` if absent, remove it otherwise.
    pub fn toggle_technology(&mut self, tech: &str) {
        if self.has_technology(tech) {
            self.technologies.retain(|t| t != tech);
        } else {
            self.technologies.push(tech.to_string());
        }
    }

    /// Add the custom technology typed into `new_technology`. Returns whether
    /// anything was added. The input is cleared either way unless it was blank.
    pub fn add_new_technology(&mut self) -> bool {
        let tech = self.new_technology.trim().to_string();
        if tech.is_empty() {
            return false;
        }
        self.new_technology.clear();
        if self.has_technology(&tech) {
            return false;
        }
        self.technologies.push(tech);
        true
    }

    /// Drop the pending image at `index`; out-of-range indexes are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }
}

impl RecordDraft for ProjectDraft {
    type Assets = Vec<UploadResult>;

    const KIND: FormKind = FormKind::Project;
    const SUCCESS_MESSAGE: &'static str = "Project uploaded successfully!";

    fn validate(&self) -> Result<(), ValidationError> {
        if blank(&self.project_name) || blank(&self.description) {
            return Err(ValidationError::MissingFields(
                "Project name and description are required".to_string(),
            ));
        }
        for (i, image) in self.images.iter().enumerate() {
            image.check(AcceptPolicy::Images, &format!("Image {}", i + 1))?;
        }
        Ok(())
    }

    fn asset_key(&self) -> Vec<AssetKey> {
        self.images.iter().map(AssetKey::from).collect()
    }

    async fn upload_assets<U: AssetUploader>(
        &self,
        uploader: &U,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<Vec<UploadResult>, UploadError> {
        upload_all(uploader, &self.images, Bucket::Projects, on_progress).await
    }

    fn into_record(self, images: Vec<UploadResult>) -> Record {
        Record::Project(Project {
            name: self.project_name.trim().to_string(),
            visibility: self.visibility,
            created_date: self.created_date,
            technologies: self.technologies,
            description: self.description.trim().to_string(),
            duration: self.duration,
            project_type: self.project_type,
            company_project: self.company_project,
            images,
            github_url: self.github_url,
            live_url: self.live_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;
    use crate::testing::image;

    #[test]
    fn test_certificate_requires_fields() {
        let mut draft = CertificateDraft {
            title: "Rust".into(),
            issuer: "Ferrous".into(),
            ..Default::default()
        };
        assert!(matches!(draft.validate(), Err(ValidationError::MissingFields(_))));

        draft.icon = Some(image("rust.png", 100));
        assert!(draft.validate().is_ok());

        draft.title = "  ".into();
        assert!(matches!(draft.validate(), Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_certificate_record_defaults() {
        let draft = CertificateDraft {
            title: " Rust ".into(),
            issuer: "Ferrous".into(),
            icon: Some(image("rust.png", 100)),
            ..Default::default()
        };
        let doc = draft.into_record(UploadResult::new("u")).to_document();
        assert_eq!(doc.get("title"), Some(&FieldValue::from("Rust")));
        assert_eq!(doc.get("date"), Some(&FieldValue::Null));
        assert_eq!(doc.get("link"), Some(&FieldValue::from("#")));
    }

    #[test]
    fn test_license_accepts_pdf_but_icon_must_be_image() {
        let mut draft = LicenseCertificateDraft {
            certificate_name: "CCP".into(),
            institute_name: "Amazon".into(),
            issue_date: "2025-06-01".into(),
            file: Some(MediaFile::new("cert.pdf", None, vec![1u8; 10])),
            issuer_icon: Some(image("aws.png", 10)),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.issuer_icon = Some(MediaFile::new("aws.pdf", None, vec![1u8; 10]));
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::UnsupportedType { .. })
        ));

        draft.issuer_icon = None;
        assert!(matches!(draft.validate(), Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_license_record_maps_fields() {
        let draft = LicenseCertificateDraft {
            certificate_name: "CCP".into(),
            institute_name: "Amazon".into(),
            issue_date: "2025-06-01".into(),
            credential_id: "ABC-123".into(),
            ..Default::default()
        };
        let doc = draft
            .into_record(LicenseAssets {
                file: UploadResult::new("file"),
                issuer_icon: UploadResult::new("icon"),
            })
            .to_document();
        assert_eq!(doc.get("credentialsId"), Some(&FieldValue::from("ABC-123")));
        assert_eq!(doc.get("link"), Some(&FieldValue::from("#")));
        assert_eq!(doc.get("icon"), Some(&FieldValue::from("file")));
    }

    #[test]
    fn test_toggle_technology() {
        let mut draft = ProjectDraft::default();
        draft.toggle_technology("React");
        draft.toggle_technology("Redux");
        assert_eq!(draft.technologies, vec!["React", "Redux"]);
        draft.toggle_technology("React");
        assert_eq!(draft.technologies, vec!["Redux"]);
    }

    #[test]
    fn test_add_new_technology() {
        let mut draft = ProjectDraft::default();

        draft.new_technology = "   ".into();
        assert!(!draft.add_new_technology());
        assert!(draft.technologies.is_empty());

        draft.new_technology = "  Dioxus ".into();
        assert!(draft.add_new_technology());
        assert_eq!(draft.technologies, vec!["Dioxus"]);
        assert!(draft.new_technology.is_empty());

        draft.new_technology = "Dioxus".into();
        assert!(!draft.add_new_technology());
        assert_eq!(draft.technologies.len(), 1);
    }

    #[test]
    fn test_remove_image() {
        let mut draft = ProjectDraft {
            images: vec![image("a.png", 1), image("b.png", 1)],
            ..Default::default()
        };
        draft.remove_image(7);
        assert_eq!(draft.images.len(), 2);
        draft.remove_image(0);
        assert_eq!(draft.images[0].name, "b.png");
    }

    #[test]
    fn test_project_without_images_is_valid() {
        let draft = ProjectDraft {
            project_name: "Folio".into(),
            description: "Admin".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        let oversized = ProjectDraft {
            images: vec![image("big.png", crate::MAX_UPLOAD_BYTES + 1)],
            ..draft
        };
        assert_eq!(
            oversized.validate(),
            Err(ValidationError::TooLarge { field: "Image 1".into() })
        );
    }

    #[test]
    fn test_option_enums_round_trip_their_values() {
        for v in Visibility::ALL {
            assert_eq!(Visibility::parse(v.as_str()), Some(v));
        }
        for t in ProjectType::ALL {
            assert_eq!(ProjectType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProjectDraft::default().project_type.as_str(), "full-stack");
        assert_eq!(ProjectDraft::default().visibility.as_str(), "public");
    }
}
