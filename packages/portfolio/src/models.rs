//! # Records and the documents they become
//!
//! A [`Record`] is what a successful submission writes: one of three tagged
//! variants, each with its own collection and field set. [`Record::to_document`]
//! lowers it into a [`NewDocument`], the untyped field mapping the document
//! database accepts. Creation timestamps are never produced here; they are
//! [`FieldValue::ServerTimestamp`] sentinels the database resolves at write
//! time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::drafts::{ProjectType, Visibility};

/// Permanent, publicly resolvable URL of an uploaded asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadResult(String);

impl UploadResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UploadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scalar (or list of scalars) stored in a document field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    String(String),
    Bool(bool),
    Array(Vec<FieldValue>),
    /// Filled in by the database with its own clock when the write lands.
    ServerTimestamp,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&UploadResult> for FieldValue {
    fn from(url: &UploadResult) -> Self {
        FieldValue::String(url.as_str().to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A document about to be created in `collection`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDocument {
    pub collection: &'static str,
    pub fields: BTreeMap<String, FieldValue>,
}

impl NewDocument {
    pub fn new(collection: &'static str) -> Self {
        Self {
            collection,
            fields: BTreeMap::new(),
        }
    }

    /// Builder method to add a field.
    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Handle to a written document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    pub collection: String,
    pub id: String,
}

/// A certificate card: one icon.
#[derive(Clone, Debug, PartialEq)]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    pub date: Option<String>,
    pub icon: UploadResult,
    pub link: Option<String>,
}

/// A license certificate: the certificate file plus the issuer's icon.
#[derive(Clone, Debug, PartialEq)]
pub struct LicenseCertificate {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub file: UploadResult,
    pub issuer_icon: UploadResult,
    pub link: Option<String>,
    pub credential_id: Option<String>,
}

/// A portfolio project with any number of screenshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub name: String,
    pub visibility: Visibility,
    pub created_date: String,
    pub technologies: Vec<String>,
    pub description: String,
    pub duration: String,
    pub project_type: ProjectType,
    pub company_project: bool,
    pub images: Vec<UploadResult>,
    pub github_url: String,
    pub live_url: String,
}

/// One of the three record shapes this dashboard creates.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Certificate(Certificate),
    LicenseCertificate(LicenseCertificate),
    Project(Project),
}

impl Record {
    pub fn collection(&self) -> &'static str {
        match self {
            Record::Certificate(_) => "certificates",
            Record::LicenseCertificate(_) => "Licensecertificates",
            Record::Project(_) => "projects",
        }
    }

    /// Lower into the field mapping written to the database.
    pub fn to_document(&self) -> NewDocument {
        let doc = NewDocument::new(self.collection());
        match self {
            Record::Certificate(c) => doc
                .field("title", c.title.as_str())
                .field("issuer", c.issuer.as_str())
                .field(
                    "date",
                    c.date.clone().map(FieldValue::String).unwrap_or(FieldValue::Null),
                )
                .field("icon", &c.icon)
                .field("link", c.link.clone().unwrap_or_else(|| "#".to_string()))
                .field("createdAt", FieldValue::ServerTimestamp),
            Record::LicenseCertificate(l) => doc
                .field("title", l.title.as_str())
                .field("issuer", l.issuer.as_str())
                .field("date", l.date.as_str())
                .field("icon", &l.file)
                .field("issuerIcon", &l.issuer_icon)
                .field("link", l.link.clone().unwrap_or_else(|| "#".to_string()))
                .field("credentialsId", l.credential_id.clone().unwrap_or_default())
                .field("createdAt", FieldValue::ServerTimestamp),
            Record::Project(p) => doc
                .field("projectName", p.name.as_str())
                .field("visibility", p.visibility.as_str())
                .field("createdDate", p.created_date.as_str())
                .field(
                    "technologies",
                    FieldValue::Array(p.technologies.iter().cloned().map(FieldValue::String).collect()),
                )
                .field("description", p.description.as_str())
                .field("duration", p.duration.as_str())
                .field("projectType", p.project_type.as_str())
                .field("companyProject", p.company_project)
                .field(
                    "images",
                    FieldValue::Array(p.images.iter().map(FieldValue::from).collect()),
                )
                .field("githubUrl", p.github_url.as_str())
                .field("liveUrl", p.live_url.as_str())
                .field("createdAt", FieldValue::ServerTimestamp)
                .field("updatedAt", FieldValue::ServerTimestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_document() {
        let record = Record::Certificate(Certificate {
            title: "React (Basic)".into(),
            issuer: "HackerRank".into(),
            date: None,
            icon: UploadResult::new("https://cdn.example/icon.png"),
            link: None,
        });
        let doc = record.to_document();
        assert_eq!(doc.collection, "certificates");
        assert_eq!(doc.get("date"), Some(&FieldValue::Null));
        assert_eq!(doc.get("link"), Some(&FieldValue::from("#")));
        assert_eq!(
            doc.get("icon"),
            Some(&FieldValue::from("https://cdn.example/icon.png"))
        );
        assert_eq!(doc.get("createdAt"), Some(&FieldValue::ServerTimestamp));
    }

    #[test]
    fn test_license_document_defaults() {
        let record = Record::LicenseCertificate(LicenseCertificate {
            title: "AWS CCP".into(),
            issuer: "Amazon".into(),
            date: "2025-06-01".into(),
            file: UploadResult::new("https://cdn.example/cert.pdf"),
            issuer_icon: UploadResult::new("https://cdn.example/aws.png"),
            link: None,
            credential_id: None,
        });
        let doc = record.to_document();
        assert_eq!(doc.collection, "Licensecertificates");
        assert_eq!(doc.get("icon"), Some(&FieldValue::from("https://cdn.example/cert.pdf")));
        assert_eq!(doc.get("issuerIcon"), Some(&FieldValue::from("https://cdn.example/aws.png")));
        assert_eq!(doc.get("credentialsId"), Some(&FieldValue::from("")));
    }

    #[test]
    fn test_project_document_has_both_timestamps() {
        let record = Record::Project(Project {
            name: "Folio".into(),
            visibility: Visibility::Private,
            created_date: String::new(),
            technologies: vec!["Rust".into()],
            description: "Admin".into(),
            duration: String::new(),
            project_type: ProjectType::Frontend,
            company_project: true,
            images: vec![UploadResult::new("a"), UploadResult::new("b")],
            github_url: String::new(),
            live_url: String::new(),
        });
        let doc = record.to_document();
        assert_eq!(doc.get("visibility"), Some(&FieldValue::from("private")));
        assert_eq!(doc.get("projectType"), Some(&FieldValue::from("frontend")));
        assert_eq!(doc.get("companyProject"), Some(&FieldValue::Bool(true)));
        assert_eq!(
            doc.get("images"),
            Some(&FieldValue::Array(vec!["a".into(), "b".into()]))
        );
        assert_eq!(doc.get("updatedAt"), Some(&FieldValue::ServerTimestamp));
        assert!(doc.get("newTechnology").is_none());
    }
}
