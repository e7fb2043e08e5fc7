use anyhow::Result;
use twgcals_core::CalendarSource;

use crate::config::AppConfig;

/// List calendars with the project and tags their tasks would get.
pub async fn run(cfg: &AppConfig) -> Result<()> {
    let settings = cfg.sync_settings()?;
    let source = super::connect(cfg).await?;

    let calendars = source.list_calendars().await?;
    if calendars.is_empty() {
        println!("No calendars found.");
        return Ok(());
    }

    for calendar in &calendars {
        match calendar.project() {
            Some(project) => {
                let tags: Vec<String> = project
                    .tags()
                    .into_iter()
                    .chain(std::iter::once(settings.marker_tag.clone()))
                    .map(|t| format!("+{t}"))
                    .collect();
                println!("📅 {}  ({})", project, calendar.id);
                println!("   tags: {}", tags.join(" "));
            }
            None => println!("📅 (unnamed, skipped)  ({})", calendar.id),
        }
    }

    Ok(())
}
