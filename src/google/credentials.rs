//! Google OAuth client credentials (user-provided).
//!
//! The file is the `credentials.json` downloaded from the Google Cloud
//! console, which nests the client under `installed` or `web`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use twgcals_core::SyncError;

/// Redirect used when the client file lists none.
const FALLBACK_REDIRECT_URI: &str = "http://localhost";

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<Credentials>,
    web: Option<Credentials>,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::Config(format!(
                "Google client secret not found at {}\n\n\
                Download an OAuth client (type \"Desktop app\") from\n\
                https://console.cloud.google.com/apis/credentials and save it there,\n\
                or point TWGCALS_CREDENTIALS at it.",
                path.display()
            ))
            .into());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read client secret file {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse client secret file {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_str(contents)
            .map_err(|e| SyncError::Config(format!("invalid client secret JSON: {e}")))?;

        let creds = file.installed.or(file.web).ok_or_else(|| {
            SyncError::Config("client secret has neither an \"installed\" nor a \"web\" client".into())
        })?;

        if creds.client_id.is_empty() || creds.client_secret.is_empty() {
            return Err(SyncError::Config("client secret is missing client_id or client_secret".into()).into());
        }

        Ok(creds)
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_REDIRECT_URI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_installed_client() {
        let json = r#"{
            "installed": {
                "client_id": "123.apps.googleusercontent.com",
                "project_id": "twgcals",
                "auth_uri": "https://accounts.google.com/o/oauth2/auth",
                "token_uri": "https://oauth2.googleapis.com/token",
                "client_secret": "shh",
                "redirect_uris": ["http://localhost"]
            }
        }"#;

        let creds = Credentials::parse(json).unwrap();
        assert_eq!(creds.client_id, "123.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "shh");
        assert_eq!(creds.redirect_uri(), "http://localhost");
    }

    #[test]
    fn test_parse_web_client_without_redirects() {
        let json = r#"{"web": {"client_id": "abc", "client_secret": "def"}}"#;

        let creds = Credentials::parse(json).unwrap();
        assert_eq!(creds.redirect_uri(), FALLBACK_REDIRECT_URI);
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        assert!(Credentials::parse(r#"{"service_account": {}}"#).is_err());
        assert!(Credentials::parse("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Credentials::load(&dir.path().join("credentials.json")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Config(_))
        ));
    }
}
