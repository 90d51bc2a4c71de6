//! Command-line argument structures.
//!
//! Isolates clap derivations so `main.rs` stays focused on runtime logic.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::bitbucket::BuildState;
use crate::settings::Overrides;
use crate::violations::{ViolationArg, ViolationSummary};

#[derive(Parser, Debug)]
#[command(
    name = "jecket",
    version,
    about = "Report Jenkins build results to BitBucket pull requests"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every sub-command.
///
/// The same keys may appear in the config file; flags win over the file.
#[derive(Args, Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Base link to the BitBucket server, e.g. `http://bitbucket.example.com`
    #[arg(long, global = true, value_name = "URL")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_link: Option<String>,
    /// Username for basic authentication
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for basic authentication
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Project key holding the repository
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Repository name
    #[arg(long = "project", global = true, value_name = "PROJECT")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Pull request ID
    #[arg(long = "pr-id", global = true, value_name = "ID")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_id: Option<String>,
    /// Commit hash receiving build statuses
    #[arg(long = "commit", global = true, value_name = "HASH")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    /// Account whose comments are updated instead of duplicated
    #[arg(long, global = true, value_name = "NAME")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_author: Option<String>,
    /// Build link appended to violation comments
    #[arg(long, global = true, value_name = "URL")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_url: Option<String>,
    /// Read configuration from this file
    #[arg(long, global = true, value_name = "FILE")]
    #[serde(skip)]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Merge another instance into `self`, overwriting every field `other`
    /// sets.
    ///
    /// CLI flags have higher priority than configuration sources.
    pub fn merge(&mut self, other: Self) {
        self.base_link = other.base_link.or_else(|| self.base_link.take());
        self.username = other.username.or_else(|| self.username.take());
        self.password = other.password.or_else(|| self.password.take());
        self.slug = other.slug.or_else(|| self.slug.take());
        self.project_name = other.project_name.or_else(|| self.project_name.take());
        self.pull_request_id = other
            .pull_request_id
            .or_else(|| self.pull_request_id.take());
        self.git_commit = other.git_commit.or_else(|| self.git_commit.take());
        self.check_author = other.check_author.or_else(|| self.check_author.take());
        self.build_url = other.build_url.or_else(|| self.build_url.take());
        self.config = other.config.or_else(|| self.config.take());
    }

    /// Explicit tier for settings resolution.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_api_link: self.base_link.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            slug: self.slug.clone(),
            project_name: self.project_name.clone(),
            pull_request_id: self.pull_request_id.clone(),
            git_commit: self.git_commit.clone(),
            check_author: self.check_author.clone(),
            build_url: self.build_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a config file with the server link and credentials
    SetConf(SetConfArgs),
    /// Set the build status of the pull request's commit
    SetStatus(SetStatusArgs),
    /// Send a comment to the pull request
    SendPrComment(CommentArgs),
    /// Publish static-analysis results on a changed file
    Report(ReportArgs),
    /// Print the commits of the pull request, one per line
    ListCommits,
}

/// Parameters accepted by the `set-conf` sub-command.
///
/// `--base-link`, `--username` and `--password` are required here.
#[derive(Args, Debug, Default)]
pub struct SetConfArgs {
    /// Write to this file instead of the XDG config location
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,
}

/// Parameters accepted by the `set-status` sub-command.
#[derive(Args, Debug, Default)]
#[command(group(
    ArgGroup::new("state")
        .required(true)
        .args(["successful", "failed", "in_progress"])
))]
pub struct SetStatusArgs {
    /// Set status to SUCCESSFUL
    #[arg(short = 's', long)]
    pub successful: bool,
    /// Set status to FAILED
    #[arg(short = 'f', long)]
    pub failed: bool,
    /// Set status to INPROGRESS
    #[arg(short = 'p', long)]
    pub in_progress: bool,
    /// Status key, defaults to `JOB_NAME`
    #[arg(long)]
    pub key: Option<String>,
    /// Link shown with the status, defaults to `BUILD_URL`
    #[arg(long, value_name = "URL")]
    pub status_url: Option<String>,
}

impl SetStatusArgs {
    #[must_use]
    pub fn state(&self) -> BuildState {
        if self.successful {
            BuildState::Successful
        } else if self.failed {
            BuildState::Failed
        } else {
            BuildState::InProgress
        }
    }
}

/// Parameters accepted by the `send-pr-comment` sub-command.
#[derive(Args, Debug, Default)]
pub struct CommentArgs {
    /// Comment text
    #[arg(short = 'c', long)]
    pub comment: String,
}

/// Parameters accepted by the `report` sub-command.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Path of the checked file, relative to the repository root
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: String,
    /// Check result as `TITLE=VALUE`; repeat for several checks
    #[arg(short = 'v', long = "violation", value_name = "TITLE=VALUE", required = true)]
    pub violations: Vec<ViolationArg>,
}

impl ReportArgs {
    #[must_use]
    pub fn summary(&self) -> ViolationSummary {
        self.violations
            .iter()
            .map(|v| (v.title.clone(), v.value.clone()))
            .collect()
    }
}
