//! Listing the commits that belong to a pull request.

use log::{debug, error};
use serde::Deserialize;

use super::transport::Transport;
use super::urls::{Endpoint, pull_request_url};
use crate::error::JecketError;
use crate::settings::{PullRequestRef, Settings};

#[derive(Debug, Deserialize)]
struct CommitPage {
    values: Vec<CommitEntry>,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    id: String,
}

/// Reads the commit identifiers of a pull request.
pub struct CommitLister<'a, T> {
    transport: &'a T,
    settings: &'a Settings,
}

impl<'a, T: Transport> CommitLister<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Commit ids of the configured pull request, in server order.
    ///
    /// # Errors
    ///
    /// See [`CommitLister::commits_of`].
    pub async fn get_commits(&self) -> Result<Vec<String>, JecketError> {
        self.commits_of(&self.settings.pull_request).await
    }

    /// Commit ids of `pr`, in server order.
    ///
    /// An empty list means the pull request really has no commits; every
    /// failure is an error instead.
    ///
    /// # Errors
    ///
    /// Returns [`JecketError::InvalidResponse`] for a non-`2xx` status or a
    /// body without a `values` list of commits, and
    /// [`JecketError::Transport`] when the server could not be reached.
    pub async fn commits_of(&self, pr: &PullRequestRef) -> Result<Vec<String>, JecketError> {
        let url = pull_request_url(&self.settings.base_api_link, pr, Endpoint::Commits);
        let resp = self
            .transport
            .get(&url, &[("withcounts", "false")])
            .await
            .map_err(|failure| {
                error!("could not list commits from {url}: {failure}");
                JecketError::Transport {
                    url: url.clone().into_boxed_str(),
                    detail: failure.0,
                }
            })?;
        let invalid = |body: &str| JecketError::InvalidResponse {
            status: resp.status,
            url: url.clone().into_boxed_str(),
            body: body.into(),
        };
        if !resp.is_success() {
            return Err(invalid(&resp.body));
        }
        let mut de = serde_json::Deserializer::from_str(&resp.body);
        let page: CommitPage = serde_path_to_error::deserialize(&mut de).map_err(|e| {
            error!("invalid commit list from {url}: {} at {}", e.inner(), e.path());
            invalid(&resp.body)
        })?;
        let ids: Vec<String> = page.values.into_iter().map(|c| c.id).collect();
        debug!("pull request {} has commits {ids:?}", pr.pull_request_id);
        Ok(ids)
    }
}
