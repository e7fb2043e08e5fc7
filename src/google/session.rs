//! Creates a valid Google session (access token) that we can use to call the gcal API.
//!
//! Tokens are cached in a JSON file and reused across runs. Without a cache
//! the user is walked through the authorization-code flow on the terminal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use twgcals_core::SyncError;

use super::credentials::Credentials;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar.readonly"];

/// Refresh a little before Google would reject the token.
const EXPIRY_LEEWAY_SECS: i64 = 60;

pub struct Session {
    path: PathBuf,
    data: SessionData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        let expires_at = if tokens.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(tokens.expires_in))
        } else {
            None
        };

        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        }
    }
}

impl Session {
    /// Reuse the cached session, refreshing it if expired, or run the
    /// interactive authorization when there is no cache yet.
    pub async fn establish(creds: &Credentials, path: &Path) -> Result<Self> {
        let mut session = match Self::load(path)? {
            Some(session) => session,
            None => return Self::authorize(creds, path).await,
        };

        if session.is_expired(Utc::now()) {
            session.refresh(creds).await?;
        }

        Ok(session)
    }

    /// Read the token cache. `None` when there is no cache file.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read token cache {}", path.display()))?;

        let data: SessionData = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse token cache {}", path.display()))?;

        debug!(path = %path.display(), "loaded cached tokens");

        Ok(Some(Session {
            path: path.to_path_buf(),
            data,
        }))
    }

    /// Interactive authorization-code exchange. Overwrites any cached tokens.
    pub async fn authorize(creds: &Credentials, path: &Path) -> Result<Self> {
        let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

        let mut client = Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            creds.redirect_uri().to_string(),
            String::new(),
            String::new(),
        );

        let auth_url = client.user_consent_url(&scopes);

        eprintln!("\nGo to the following link in your browser, then paste the authorization code");
        eprintln!("(or the whole URL you were redirected to):\n");
        eprintln!("{}\n", auth_url);

        if open::that(&auth_url).is_err() {
            eprintln!("(Could not open browser automatically, please copy the URL above)");
        }

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .context("Unable to read authorization code")?;

        let (code, state) = parse_authorization_input(&line)
            .ok_or_else(|| SyncError::Auth("no authorization code given".into()))?;

        let tokens = client
            .get_access_token(&code, &state)
            .await
            .map_err(|e| SyncError::Auth(format!("Unable to exchange authorization code: {e}")))?;

        if tokens.refresh_token.is_empty() {
            warn!("Google returned no refresh token; you will need to authorize again when it expires");
        }

        let session = Session {
            path: path.to_path_buf(),
            data: (&tokens).into(),
        };
        session.save()?;

        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize tokens")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write token cache {}", self.path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", self.path.display()))?;
        }

        info!(path = %self.path.display(), "saved tokens");
        Ok(())
    }

    pub fn client(&self, creds: &Credentials) -> Client {
        Client::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            creds.redirect_uri().to_string(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        )
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.data.expires_at {
            Some(expires_at) => now + Duration::seconds(EXPIRY_LEEWAY_SECS) >= expires_at,
            None => false,
        }
    }

    async fn refresh(&mut self, creds: &Credentials) -> Result<()> {
        if self.data.refresh_token.is_empty() {
            return Err(SyncError::Auth(format!(
                "access token expired and no refresh token is cached; run `twgcals auth` (cache: {})",
                self.path.display()
            ))
            .into());
        }

        debug!("access token expired, refreshing");

        let mut tokens = self
            .client(creds)
            .refresh_access_token()
            .await
            .map_err(|e| SyncError::Auth(format!("Failed to refresh token: {e}")))?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = (&tokens).into();
        self.save()
    }
}

/// Pull the code (and state, if present) out of what the user pasted.
///
/// Accepts either the bare code or the full redirect URL.
fn parse_authorization_input(input: &str) -> Option<(String, String)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match url::Url::parse(input) {
        Ok(url) => {
            let code = url
                .query_pairs()
                .find(|(k, _)| k == "code")
                .map(|(_, v)| v.to_string())?;
            let state = url
                .query_pairs()
                .find(|(k, _)| k == "state")
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            Some((code, state))
        }
        Err(_) => Some((input.to_string(), String::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_at(path: &Path, expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            path: path.to_path_buf(),
            data: SessionData {
                access_token: "ya29.access".to_string(),
                refresh_token: "1//refresh".to_string(),
                expires_at,
            },
        }
    }

    #[test]
    fn test_bare_code_is_accepted() {
        assert_eq!(
            parse_authorization_input("4/0AbCdEf\n"),
            Some(("4/0AbCdEf".to_string(), String::new()))
        );
    }

    #[test]
    fn test_code_is_taken_from_redirect_url() {
        let pasted = "http://localhost/?state=xyz&code=4/0AbC&scope=https://www.googleapis.com/auth/calendar.readonly";
        assert_eq!(
            parse_authorization_input(pasted),
            Some(("4/0AbC".to_string(), "xyz".to_string()))
        );
    }

    #[test]
    fn test_empty_or_codeless_input_is_rejected() {
        assert_eq!(parse_authorization_input("   \n"), None);
        assert_eq!(parse_authorization_input("http://localhost/?error=access_denied"), None);
    }

    #[test]
    fn test_expiry_uses_leeway() {
        let dir = tempfile::tempdir().unwrap();
        let expires_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let session = session_at(&dir.path().join("token.json"), Some(expires_at));

        assert!(!session.is_expired(expires_at - Duration::minutes(5)));
        assert!(session.is_expired(expires_at - Duration::seconds(30)));
        assert!(session.is_expired(expires_at + Duration::minutes(1)));
    }

    #[test]
    fn test_unknown_expiry_is_not_expired() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_at(&dir.path().join("token.json"), None);
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_save_then_load_keeps_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token.json");
        let expires_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let session = session_at(&path, Some(expires_at));

        session.save().unwrap();
        let loaded = Session::load(&path).unwrap().unwrap();

        assert_eq!(loaded.data, session.data);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_cache_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Session::load(&dir.path().join("token.json")).unwrap().is_none());
    }
}
