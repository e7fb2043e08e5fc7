use std::path::Path;

use anyhow::{Context, Result};

use crate::config::AppConfig;

/// Print the effective configuration as TOML.
pub fn run(cfg: &AppConfig, path: Option<&Path>) -> Result<()> {
    let config_path = AppConfig::resolve_path(path)?;
    print!("{}", render(cfg, &config_path)?);

    Ok(())
}

fn render(cfg: &AppConfig, config_path: &Path) -> Result<String> {
    let contents = toml::to_string_pretty(cfg).context("Failed to serialize config")?;

    Ok(format!("# {}\n{contents}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_the_explicit_file() {
        let cfg: AppConfig = toml::from_str("max_results = 5\n").unwrap();
        let path = AppConfig::resolve_path(Some(Path::new("/srv/twgcals.toml"))).unwrap();

        let out = render(&cfg, &path).unwrap();

        assert!(out.starts_with("# /srv/twgcals.toml\n"));
        assert!(out.contains("max_results = 5"));
    }
}
