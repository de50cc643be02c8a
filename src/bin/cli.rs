// src/bin/cli.rs

//! jobwatch CLI
//!
//! Runs one scrape/notify pass and exits; schedule it with cron or a timer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobwatch::{
    config::{load_config, load_dotenv, load_mail_config},
    error::Result,
    pipeline,
    services::Notifier,
    storage::{ListingStore, LocalStore},
    utils::http,
};

/// jobwatch - Job Opening Watcher
#[derive(Parser, Debug)]
#[command(
    name = "jobwatch",
    version,
    about = "Emails newly posted job openings from configured employers"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Path to the seen-listings file
    #[arg(short, long, default_value = "jobs.json")]
    store: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape all targets, mail new listings and record them
    Run {
        /// Report new listings without mailing or recording them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file and mail environment
    Validate,

    /// Show seen-set info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    load_dotenv();

    let store = LocalStore::new(&cli.store);

    match cli.command {
        Command::Run { dry_run } => {
            let config = load_config(&cli.config)?;

            // Mail settings are checked before any request goes out.
            let notifier = if dry_run {
                log::info!("Dry run: nothing will be mailed or recorded");
                None
            } else {
                let mail = load_mail_config()?;
                Some(Notifier::smtp(&mail, &config.mail.subject)?)
            };

            let client = http::create_client(&config.crawler)?;
            let summary =
                pipeline::run_pipeline(&config, &client, &store, notifier.as_ref()).await?;

            log::info!(
                "Run complete in {}s: {} scraped, {} matched, {} new{}",
                (summary.end_time - summary.start_time).num_seconds(),
                summary.scraped_count,
                summary.matched_count,
                summary.new_listings.len(),
                if summary.notified { ", notification sent" } else { "" }
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            let config = load_config(&cli.config)?;
            log::info!(
                "✓ Config OK ({} keywords, {} locations, {} targets)",
                config.keywords.len(),
                config.locations.len(),
                config.target_count()
            );

            let mail = match load_mail_config() {
                Ok(mail) => mail,
                Err(e) => {
                    log::error!("Mail settings invalid: {}", e);
                    return Err(e);
                }
            };
            Notifier::smtp(&mail, &config.mail.subject)?;
            log::info!("✓ Mail OK ({} via {}:{})", mail.recipient, mail.host, mail.port);

            log::info!("All validations passed!");
        }

        Command::Info => {
            log::info!("Config file: {}", cli.config.display());
            log::info!(
                "Seen set: {}",
                if store.path().exists() {
                    "exists"
                } else {
                    "not found"
                }
            );

            let seen = store.load().await?;
            log::info!("Seen listings: {}", seen.len());
            if let Some(last) = seen.last() {
                log::info!("Most recent: {}", last);
            }
        }
    }

    Ok(())
}
