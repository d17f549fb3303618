use clap::Subcommand;
use serde_json::json;

use crate::api::DatabaseGateway;
use crate::backup::{format_file_size, BackupConsole, RestoreOutcome};
use crate::cli::utils::{output_records, output_success};
use crate::cli::{Context, OutputFormat};
use crate::models::BackupStatistics;

#[derive(Subcommand)]
pub enum BackupCommands {
    #[command(about = "List backups on the server, newest first")]
    List,

    #[command(about = "Create a backup and download it")]
    Create {
        #[arg(long, help = "Download as a zip archive")]
        compress: bool,
    },

    #[command(about = "Restore the database from a server-side backup file")]
    Restore {
        #[arg(help = "Backup filename (.sqlite, .db or .zip)")]
        filename: String,
    },

    #[command(about = "Backup counters and slot usage")]
    Stats,

    #[command(about = "Database size and backup counters")]
    Info,
}

fn print_statistics(stats: &BackupStatistics) {
    println!("Backups: {} of {} ({} slots free)", stats.total_backups, stats.max_allowed, stats.available_slots);
    println!("Total size: {}", format_file_size(stats.total_size));
    if !stats.latest_backup.is_empty() {
        println!("Latest: {}", stats.latest_backup);
    }
    if !stats.oldest_backup.is_empty() {
        println!("Oldest: {}", stats.oldest_backup);
    }
}

pub async fn handle(cmd: BackupCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let mut console = BackupConsole::from_config(DatabaseGateway::new(ctx.client.clone()), ctx.config);

    match cmd {
        BackupCommands::List => {
            if let Err(err) = console.load().await {
                return Err(anyhow::Error::new(err).context("Error loading backups"));
            }
            output_records(&ctx.output, "backups", console.entries(), "No backups found")
        }
        BackupCommands::Create { compress } => match console.create(compress).await {
            Ok(path) => output_success(
                &ctx.output,
                &format!("Backup created and downloaded successfully! Saved to {}", path.display()),
                Some(json!({ "path": path })),
            ),
            Err(err) => Err(anyhow::Error::new(err).context("Error creating backup")),
        },
        BackupCommands::Restore { filename } => match console.restore(&filename, &ctx.confirmer()).await {
            Ok(RestoreOutcome::Restored) => output_success(&ctx.output, "Database restored successfully!", None),
            Ok(RestoreOutcome::Declined) => output_success(&ctx.output, "Cancelled", None),
            Err(err) => {
                let message = console.notice().map(|n| n.text.clone()).unwrap_or_default();
                Err(anyhow::Error::new(err).context(message))
            }
        },
        BackupCommands::Stats => {
            let stats = console.statistics().await?;
            match ctx.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => print_statistics(&stats),
            }
            Ok(())
        }
        BackupCommands::Info => {
            let info = console.info().await?;
            match ctx.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
                OutputFormat::Text => {
                    println!("Database size: {}", format_file_size(info.database_size));
                    print_statistics(&info.statistics);
                }
            }
            Ok(())
        }
    }
}
