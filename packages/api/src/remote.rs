//! Error bodies shared by the Google and Cloudinary REST APIs.
//!
//! Both answer failures with `{"error": {"message": "..."}}`; Google adds a
//! numeric `code` and a `status` string.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Message and optional status of a remote error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RemoteError {
    pub message: String,
    pub status: Option<String>,
}

impl RemoteError {
    pub fn parse(body: &str) -> Option<Self> {
        let body: ErrorBody = serde_json::from_str(body).ok()?;
        Some(Self {
            message: body.error.message,
            status: body.error.status,
        })
    }
}

/// Read a failed response into a displayable message.
pub(crate) async fn failure_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match RemoteError::parse(&text) {
        Some(err) if !err.message.is_empty() => err.message,
        _ => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_google_error() {
        let err = RemoteError::parse(
            r#"{"error":{"code":400,"message":"INVALID_PASSWORD","status":"INVALID_ARGUMENT"}}"#,
        )
        .unwrap();
        assert_eq!(err.message, "INVALID_PASSWORD");
        assert_eq!(err.status.as_deref(), Some("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_parse_cloudinary_error() {
        let err = RemoteError::parse(r#"{"error":{"message":"Upload preset not found"}}"#).unwrap();
        assert_eq!(err.message, "Upload preset not found");
        assert!(err.status.is_none());
        assert!(RemoteError::parse("<html>bad gateway</html>").is_none());
    }
}
