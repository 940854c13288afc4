//! CLI interface for release-audit.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod audit;
pub mod issues;

/// release-audit: Cross-checks release branches against JIRA fix versions.
#[derive(Parser)]
#[command(name = "release-audit")]
#[command(about = "Cross-checks release branches against JIRA fix versions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Reports discrepancies between release commits and JIRA.
    Audit(audit::AuditCommand),
    /// Lists the issue IDs referenced by a commit range.
    Issues(issues::IssuesCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Audit(audit_cmd) => audit_cmd.execute().await,
            Commands::Issues(issues_cmd) => issues_cmd.execute(),
        }
    }
}
