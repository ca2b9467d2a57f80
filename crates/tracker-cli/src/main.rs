//! Tracker CLI
//!
//! Command-line client for viewing Jira issues.

mod render;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracker_core::storage::{get_config_dir, ConfigStorage};
use view::ViewArgs;

#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(about = "Tracker - Jira issues from the command line", long_about = None)]
struct Args {
    /// Configuration directory (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with issues
    Issue {
        #[command(subcommand)]
        command: IssueCommand,
    },
}

#[derive(Subcommand, Debug)]
enum IssueCommand {
    /// View displays contents of an issue
    #[command(visible_alias = "show")]
    View(ViewArgs),
}

fn setup_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(level)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match &args.command {
        Command::Issue {
            command: IssueCommand::View(view),
        } if view.debug => "debug",
        _ => args.log_level.as_str(),
    };
    setup_logging(level);

    let config_dir = match args.config {
        Some(dir) => dir,
        None => get_config_dir()?,
    };
    let storage = ConfigStorage::new(config_dir);
    tracing::debug!("Loading configuration from {}", storage.path().display());
    let config = storage.load()?;

    match args.command {
        Command::Issue { command } => match command {
            IssueCommand::View(view_args) => view::run(&config, view_args).await,
        },
    }
}
