//! Pull request comments: posting free text and upserting the check
//! author's comment on a file.
//!
//! BitBucket has no upsert verb, so reporting violations for a file reads
//! the file's comments, reuses the first one written by the check author
//! and `PUT`s the new text over it with the version the server returned.
//! Only when no such comment exists is a new one `POST`ed.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::outcome::Outcome;
use super::transport::Transport;
use super::urls::{Endpoint, comment_url, pull_request_url};
use crate::settings::Settings;
use crate::violations::ViolationSummary;

/// Server-assigned identifier or version, echoed back with its JSON type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Opaque {
    Number(i64),
    Text(String),
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Associates a comment with a file in the pull request diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub path: String,
}

/// The parts of a listed comment needed to update it in place.
///
/// Text, anchor and any other fields are ignored, so their shape never
/// hides the check author's comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: Opaque,
    pub version: Opaque,
    pub author: Author,
}

const NO_VALUES_KEY: &str = "No 'values' key";
const UNDECODABLE: &str = "Can not decode json";

/// Creates or updates the check author's comments on a pull request.
pub struct CommentReconciler<'a, T> {
    transport: &'a T,
    settings: &'a Settings,
}

impl<'a, T: Transport> CommentReconciler<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, settings: &'a Settings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    fn comments_url(&self) -> String {
        pull_request_url(
            &self.settings.base_api_link,
            &self.settings.pull_request,
            Endpoint::Comments,
        )
    }

    /// Post `text` as a general pull request comment.
    pub async fn post_comment(&self, text: &str) -> Outcome {
        info!("sending comment to pull request");
        let payload = json!({ "text": text });
        self.transport
            .post(&self.comments_url(), &payload)
            .await
            .into()
    }

    /// Publish `violations` on `checked_file`, updating the check author's
    /// existing comment if there is one.
    pub async fn report_violations(
        &self,
        checked_file: &str,
        violations: &ViolationSummary,
    ) -> Outcome {
        let text = violations.comment_text(&self.settings.build_url);
        let comments_url = self.comments_url();
        let existing = match self.find_own_comment(&comments_url, checked_file).await {
            Ok(found) => found,
            Err(outcome) => return outcome,
        };
        let anchor = Anchor {
            path: checked_file.to_owned(),
        };
        match existing {
            None => {
                debug!(
                    "no comment by {} on {checked_file}; creating one",
                    self.settings.check_author
                );
                let payload = json!({ "text": text, "anchor": anchor });
                self.transport.post(&comments_url, &payload).await.into()
            }
            Some(comment) => {
                debug!(
                    "updating comment {} (version {}) on {checked_file}",
                    comment.id, comment.version
                );
                let url = comment_url(&comments_url, &comment.id.to_string());
                let payload = json!({
                    "version": comment.version,
                    "text": text,
                    "anchor": anchor,
                });
                self.transport.put(&url, &payload).await.into()
            }
        }
    }

    /// Fetch the comments on `checked_file` and return the first one by the
    /// check author.
    ///
    /// A failed fetch is returned as the terminal [`Outcome`].
    async fn find_own_comment(
        &self,
        comments_url: &str,
        checked_file: &str,
    ) -> Result<Option<Comment>, Outcome> {
        debug!("fetching comments for file {checked_file}");
        let resp = match self
            .transport
            .get(comments_url, &[("path", checked_file)])
            .await
        {
            Ok(resp) if resp.is_success() => resp,
            reply => {
                let outcome = Outcome::from(reply);
                warn!("could not fetch comments for file {checked_file}: {outcome}");
                return Err(outcome);
            }
        };
        let entries = decode_values(&resp.body).map_err(|detail| {
            warn!("comments for file {checked_file}: {detail}");
            Outcome::DecodeFailure(detail.into())
        })?;
        Ok(first_by_author(
            entries,
            &self.settings.check_author,
            checked_file,
        ))
    }
}

/// Extract the `values` array from a collection page.
fn decode_values(body: &str) -> Result<Vec<Value>, &'static str> {
    let page: Value = serde_json::from_str(body).map_err(|_| UNDECODABLE)?;
    let Value::Object(mut fields) = page else {
        return Err(NO_VALUES_KEY);
    };
    match fields.remove("values") {
        Some(Value::Array(values)) => Ok(values),
        Some(_) | None => Err(NO_VALUES_KEY),
    }
}

/// Scan `entries` in server order for the first comment by `author`.
///
/// Entries lacking an author name, id or version are skipped with a
/// warning so a single odd comment cannot block the upsert.
fn first_by_author(entries: Vec<Value>, author: &str, checked_file: &str) -> Option<Comment> {
    for (idx, entry) in entries.into_iter().enumerate() {
        let comment: Comment = match serde_path_to_error::deserialize(entry) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "skipping malformed comment #{idx} on {checked_file}: {} at {}",
                    e.inner(),
                    e.path()
                );
                continue;
            }
        };
        if comment.author.name == author {
            debug!("found comment {} by {author} on {checked_file}", comment.id);
            return Some(comment);
        }
    }
    None
}
