//! # Service configuration — `admin.toml`
//!
//! Endpoints and credentials for the three hosted services. The web build
//! embeds the file; native builds may override single values from the
//! environment (see [`AdminConfig::with_env_overrides`]).
//!
//! ```toml
//! [identity]
//! api_key = "AIza..."
//!
//! [database]
//! project_id = "my-portfolio"
//!
//! [uploads]
//! cloud_name = "demo"
//! certificates_preset = "portfolio_certs"
//! projects_preset = "portfolio_projects"
//! ```
//!
//! Every section and field has a default, so a missing key falls back to the
//! public endpoint of the corresponding service.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// Identity provider (Firebase Auth REST).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_auth_base")]
    pub auth_base: String,
    #[serde(default = "default_token_base")]
    pub token_base: String,
}

/// Document database (Firestore REST).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_database_base")]
    pub base_url: String,
}

/// Image host (Cloudinary upload API).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadsConfig {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default = "default_uploads_base")]
    pub base_url: String,
    #[serde(default = "default_certificates_preset")]
    pub certificates_preset: String,
    #[serde(default = "default_projects_preset")]
    pub projects_preset: String,
}

fn default_auth_base() -> String {
    "https://identitytoolkit.googleapis.com/v1".to_string()
}

fn default_token_base() -> String {
    "https://securetoken.googleapis.com/v1".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_database_base() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_uploads_base() -> String {
    "https://api.cloudinary.com".to_string()
}

fn default_certificates_preset() -> String {
    "portfolio_certs".to_string()
}

fn default_projects_preset() -> String {
    "portfolio_projects".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_base: default_auth_base(),
            token_base: default_token_base(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            base_url: default_database_base(),
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            base_url: default_uploads_base(),
            certificates_preset: default_certificates_preset(),
            projects_preset: default_projects_preset(),
        }
    }
}

impl AdminConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "admin.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Names of required values that are still empty.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.identity.api_key.is_empty() {
            missing.push("identity.api_key");
        }
        if self.database.project_id.is_empty() {
            missing.push("database.project_id");
        }
        if self.uploads.cloud_name.is_empty() {
            missing.push("uploads.cloud_name");
        }
        missing
    }

    /// Override values from `PORTFOLIO_*` environment variables (and a `.env`
    /// file, if present).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_env_overrides(mut self) -> Self {
        dotenvy::dotenv().ok();

        let overrides: [(&str, &mut String); 5] = [
            ("PORTFOLIO_API_KEY", &mut self.identity.api_key),
            ("PORTFOLIO_PROJECT_ID", &mut self.database.project_id),
            ("PORTFOLIO_CLOUD_NAME", &mut self.uploads.cloud_name),
            ("PORTFOLIO_CERTIFICATES_PRESET", &mut self.uploads.certificates_preset),
            ("PORTFOLIO_PROJECTS_PRESET", &mut self.uploads.projects_preset),
        ];
        for (key, slot) in overrides {
            if let Ok(value) = std::env::var(key) {
                *slot = value;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AdminConfig::from_toml("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.uploads.certificates_preset, "portfolio_certs");
        assert_eq!(config.database.database, "(default)");
        assert_eq!(
            config.missing(),
            vec!["identity.api_key", "database.project_id", "uploads.cloud_name"]
        );
    }

    #[test]
    fn test_partial_section() {
        let config = AdminConfig::from_toml(
            r#"
            [uploads]
            cloud_name = "dx7"
            projects_preset = "shots"
            "#,
        )
        .unwrap();
        assert_eq!(config.uploads.cloud_name, "dx7");
        assert_eq!(config.uploads.projects_preset, "shots");
        assert_eq!(config.uploads.certificates_preset, "portfolio_certs");
        assert_eq!(config.uploads.base_url, "https://api.cloudinary.com");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AdminConfig::default();
        config.identity.api_key = "key".into();
        let text = config.to_toml().unwrap();
        assert_eq!(AdminConfig::from_toml(&text).unwrap(), config);
    }
}
