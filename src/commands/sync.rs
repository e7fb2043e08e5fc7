use anyhow::Result;
use chrono::{Local, Utc};
use twgcals_core::{SyncReport, Synchronizer};

use crate::config::AppConfig;
use crate::dry_run::DryRun;
use crate::taskwarrior::TaskWarrior;

pub async fn run(cfg: &AppConfig, dry_run: bool) -> Result<()> {
    let settings = cfg.sync_settings()?;
    let store = TaskWarrior::new(&cfg.task_binary, cfg.task_timeout())?;
    let source = super::connect(cfg).await?;

    let report = if dry_run {
        let dry = DryRun::new(store);
        let sync = Synchronizer::new(source, &dry, settings);
        let report = sync.run(Utc::now()).await?;
        for task in dry.skipped() {
            println!(
                "  would add: {} (project:{} due:{} until:{})",
                task.description,
                task.project,
                task.due.render_in(&Local),
                task.until.render_in(&Local),
            );
        }
        report
    } else {
        Synchronizer::new(source, store, settings)
            .run(Utc::now())
            .await?
    };

    print_report(&report, dry_run);

    Ok(())
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let verb = if dry_run { "would be created" } else { "created" };

    println!(
        "\n{} calendars, {} upcoming events: {} tasks {}, {} already synced",
        report.calendars, report.events, report.created, verb, report.already_synced
    );

    if report.skipped_calendars > 0 {
        println!("{} calendars skipped (no name)", report.skipped_calendars);
    }
}
