use std::path::Path;

use anyhow::Result;

use crate::config::AppConfig;
use crate::google::{Credentials, Session};

/// Run the authorization flow again, replacing any cached tokens.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let creds = Credentials::load(&cfg.credentials_path())?;
    let token_cache = cfg.token_cache_path();

    Session::authorize(&creds, &token_cache).await?;

    println!("{}", saved_message(&token_cache));
    println!("\nAuthenticated. Run `twgcals sync` to create tasks for upcoming events.");

    Ok(())
}

fn saved_message(token_cache: &Path) -> String {
    format!("Saved tokens to: {}", token_cache.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_message_is_past_tense() {
        let msg = saved_message(Path::new("/home/me/.config/twgcals/token.json"));
        assert_eq!(msg, "Saved tokens to: /home/me/.config/twgcals/token.json");
    }
}
