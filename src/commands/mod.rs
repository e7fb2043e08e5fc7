pub mod auth;
pub mod calendars;
pub mod config;
pub mod sync;

use anyhow::Result;
use tracing::debug;

use crate::config::AppConfig;
use crate::google::{Credentials, GoogleCalendar, Session};

/// Load credentials, establish a session and build the calendar source.
pub async fn connect(cfg: &AppConfig) -> Result<GoogleCalendar> {
    let credentials_path = cfg.credentials_path();
    debug!(path = %credentials_path.display(), "loading client secret");
    let creds = Credentials::load(&credentials_path)?;

    let session = Session::establish(&creds, &cfg.token_cache_path()).await?;

    Ok(GoogleCalendar::new(session.client(&creds)))
}
