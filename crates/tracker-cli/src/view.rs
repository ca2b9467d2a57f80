//! `issue view` command

use anyhow::Result;
use clap::Args;
use tracker_core::models::{resolve_issue_key, Config, IssueTypeField};
use tracker_core::select_custom_fields;
use tracker_jira::JiraClient;

use crate::render::{IssueOption, IssueView};

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  $ tracker issue view ISSUE-1

  # Show 5 recent comments when viewing the issue
  $ tracker issue view ISSUE-1 --comments 5

  # Include custom fields 10010 and 10020
  $ tracker issue view ISSUE-1 --custom-fields 10010,10020

  # Get the raw JSON data
  $ tracker issue view ISSUE-1 --raw")]
pub struct ViewArgs {
    /// Issue key, eg: ISSUE-1
    pub key: String,

    /// Show N comments
    #[arg(long, default_value_t = 1)]
    pub comments: usize,

    /// Display output in plain mode
    #[arg(long)]
    pub plain: bool,

    /// Print raw Jira API response
    #[arg(long)]
    pub raw: bool,

    /// Custom field IDs to include in output
    #[arg(long = "custom-fields", value_delimiter = ',')]
    pub custom_fields: Vec<String>,

    /// Turn on debug output
    #[arg(long)]
    pub debug: bool,
}

pub async fn run(config: &Config, args: ViewArgs) -> Result<()> {
    let key = resolve_issue_key(config.project_key(), &args.key);
    let client = JiraClient::from_config(config)?;

    if args.raw {
        let raw = client.get_issue_raw(&key).await?;
        println!("{}", raw);
        return Ok(());
    }

    let fetch_custom_fields = !args.custom_fields.is_empty();
    tracing::info!("Fetching issue details for {}", key);
    let issue = client
        .get_issue(&key, fetch_custom_fields, args.comments)
        .await?;

    let view = IssueView {
        server: config.server.clone(),
        issue: &issue,
        plain: args.plain,
        options: IssueOption {
            num_comments: args.comments,
            custom_fields: requested_fields(config, &args.custom_fields),
        },
    };
    print!("{}", view.render());
    Ok(())
}

/// Catalog entries for the requested ids; empty when the site has no catalog
fn requested_fields(config: &Config, requested: &[String]) -> Vec<IssueTypeField> {
    if requested.is_empty() {
        return Vec::new();
    }

    match config.configured_custom_fields() {
        Ok(catalog) => {
            let selected = select_custom_fields(requested, &catalog);
            if selected.is_empty() {
                tracing::warn!("None of the requested custom fields are configured");
            }
            selected
        }
        Err(e) => {
            tracing::warn!("Custom field filtering unavailable: {}", e);
            Vec::new()
        }
    }
}
