//! Build statuses attached to a commit.

use std::fmt;

use log::info;
use serde_json::json;

use super::outcome::Outcome;
use super::transport::Transport;
use super::urls::build_status_url;
use crate::settings::Settings;

/// The states BitBucket understands, as selected by the CLI flags.
///
/// [`BuildStatusReporter::send_build_status`] accepts any string; the server
/// decides what is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    InProgress,
    Successful,
    Failed,
}

impl BuildState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "INPROGRESS",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Posts build statuses for a commit.
pub struct BuildStatusReporter<'a, T> {
    transport: &'a T,
    settings: &'a Settings,
}

impl<'a, T: Transport> BuildStatusReporter<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Post `{state, key, url}` against `commit_hash`, or the configured
    /// commit when `None`.
    pub async fn send_build_status(
        &self,
        state: &str,
        key: &str,
        build_url: &str,
        commit_hash: Option<&str>,
    ) -> Outcome {
        let commit = commit_hash.unwrap_or(self.settings.git_commit.as_str());
        let url = build_status_url(&self.settings.base_api_link, commit);
        info!("sending build status {state} for commit {commit}");
        let payload = json!({ "state": state, "key": key, "url": build_url });
        let outcome: Outcome = self.transport.post(&url, &payload).await.into();
        info!("sending build status finished: {outcome}");
        outcome
    }
}
