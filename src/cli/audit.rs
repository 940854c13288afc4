//! Audit command — compares release commits with JIRA fix versions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::audit::report::{render_section, MISSED_IN_PREVIOUS_RELEASE_HEADER};
use crate::audit::{
    load_ignore_list, AuditParams, Auditor, IgnoreLists, DEFAULT_RELEASE_TAG_PREFIX,
};
use crate::git::GitRepository;
use crate::jira::{JiraClient, DEFAULT_JIRA_URL, DEFAULT_PROJECT};
use crate::utils::Settings;

/// Audit command options.
#[derive(Parser)]
pub struct AuditCommand {
    /// Comma separated list of release versions.
    #[arg(long, value_delimiter = ',', required = true)]
    pub release_versions: Vec<String>,

    /// Previous release version.
    #[arg(long)]
    pub previous_release_version: String,

    /// Git branch for current release.
    #[arg(long)]
    pub release_branch: String,

    /// Git branch for the previous release.
    #[arg(long)]
    pub previous_release_branch: String,

    /// Local git repository directory.
    #[arg(long)]
    pub repo: PathBuf,

    /// File of issues to ignore when checking issues in the previous
    /// release but not in the current release.
    #[arg(long, value_name = "FILE")]
    pub ignore_missing_in_current_release: Option<PathBuf>,

    /// File of issues to ignore when checking issues in JIRA fix versions
    /// but not in git commits.
    #[arg(long, value_name = "FILE")]
    pub ignore_missing_in_git: Option<PathBuf>,

    /// File of issues to ignore when checking issues in git commits but not
    /// in JIRA fix versions.
    #[arg(long, value_name = "FILE")]
    pub ignore_missing_in_jira: Option<PathBuf>,

    /// JIRA base URL (default: $JIRA_URL or the Apache JIRA).
    #[arg(long)]
    pub jira_url: Option<String>,

    /// JIRA project key (default: $JIRA_PROJECT or HBase).
    #[arg(long)]
    pub project: Option<String>,

    /// Tag prefix of published releases.
    #[arg(long, default_value = DEFAULT_RELEASE_TAG_PREFIX)]
    pub release_tag_prefix: String,
}

impl AuditCommand {
    /// Executes the audit command.
    pub async fn execute(self) -> Result<()> {
        let repo = GitRepository::open_at(&self.repo)?;

        let ignore = IgnoreLists {
            missing_in_current_release: load_ignore_list(
                self.ignore_missing_in_current_release.as_deref(),
            )?,
            missing_in_git: load_ignore_list(self.ignore_missing_in_git.as_deref())?,
            missing_in_jira: load_ignore_list(self.ignore_missing_in_jira.as_deref())?,
        };

        let settings = Settings::load()?;
        let client = self.jira_client(&settings)?;

        let params = AuditParams {
            release_branch: self.release_branch,
            previous_release_branch: self.previous_release_branch,
            previous_release_version: self.previous_release_version,
            release_versions: self.release_versions,
            release_tag_prefix: self.release_tag_prefix,
        };

        let auditor = Auditor::new(&repo, &client);
        let release = auditor.release_issues(&params)?;
        println!("{}", release.current);
        println!("{}", release.previous);

        // The lost-backport section needs no tracker, so it is shown even
        // if the JIRA search fails.
        let missed = release.missed_in_previous_release(&ignore.missing_in_current_release);
        print!(
            "{}",
            render_section(MISSED_IN_PREVIOUS_RELEASE_HEADER, &missed)
        );

        let report = auditor.report(&params, &release, &ignore).await?;
        for (header, issues) in report.sections().into_iter().skip(1) {
            print!("{}", render_section(header, issues));
        }

        Ok(())
    }

    /// Builds the JIRA client from flags, environment and settings.
    fn jira_client(&self, settings: &Settings) -> Result<JiraClient> {
        let jira_url = self
            .jira_url
            .clone()
            .or_else(|| settings.get_env_var("JIRA_URL"))
            .unwrap_or_else(|| DEFAULT_JIRA_URL.to_string());
        let project = self
            .project
            .clone()
            .or_else(|| settings.get_env_var("JIRA_PROJECT"))
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());

        debug!(jira_url = %jira_url, project = %project, "Configuring JIRA client");

        let client = JiraClient::new(&jira_url, project).context("Failed to create JIRA client")?;

        match (
            settings.get_env_var("JIRA_USERNAME"),
            settings.get_env_var("JIRA_API_TOKEN"),
        ) {
            (Some(username), Some(api_token)) => Ok(client.with_credentials(username, api_token)),
            _ => Ok(client),
        }
    }
}
