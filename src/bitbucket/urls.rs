//! REST URL construction for the BitBucket Server API.
//!
//! Placeholders are substituted verbatim. Values containing `/` or other
//! reserved characters are not percent-encoded, matching what existing
//! Jenkins jobs already pass through.

use crate::settings::PullRequestRef;

/// Pull request resource template relative to the server base link.
pub const PULL_REQUEST_TEMPLATE: &str =
    "/rest/api/1.0/projects/{SLUG}/repos/{PROJECT}/pull-requests/{PRI}/";

/// Build-status resource prefix; the commit hash is appended directly.
pub const BUILD_STATUS_PATH: &str = "/rest/build-status/1.0/commits/";

/// Collection under a pull request resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Comments,
    Commits,
}

impl Endpoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Commits => "commits",
        }
    }
}

/// Expand `template` for `pr`, normalise the trailing slash and append
/// `suffix`.
///
/// # Examples
///
/// ```
/// use jecket::bitbucket::urls::build_url;
/// use jecket::settings::PullRequestRef;
///
/// let pr = PullRequestRef {
///     slug: "S".into(),
///     project_name: "P".into(),
///     pull_request_id: "7".into(),
/// };
/// let url = build_url("http://x", "/a/{SLUG}/b/{PROJECT}/c/{PRI}", &pr, "comments");
/// assert_eq!(url, "http://x/a/S/b/P/c/7/comments");
/// ```
#[must_use]
pub fn build_url(base_link: &str, template: &str, pr: &PullRequestRef, suffix: &str) -> String {
    let mut url = format!("{base_link}{template}")
        .replacen("{SLUG}", &pr.slug, 1)
        .replacen("{PROJECT}", &pr.project_name, 1)
        .replacen("{PRI}", &pr.pull_request_id, 1);
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(suffix);
    url
}

/// URL of a pull request collection using the standard template.
#[must_use]
pub fn pull_request_url(base_link: &str, pr: &PullRequestRef, endpoint: Endpoint) -> String {
    build_url(base_link, PULL_REQUEST_TEMPLATE, pr, endpoint.as_str())
}

/// URL of a single comment inside a comments collection.
#[must_use]
pub fn comment_url(comments_url: &str, id: &str) -> String {
    format!("{comments_url}/{id}")
}

/// URL receiving build statuses for `commit_hash`.
#[must_use]
pub fn build_status_url(base_link: &str, commit_hash: &str) -> String {
    format!("{base_link}{BUILD_STATUS_PATH}{commit_hash}")
}
