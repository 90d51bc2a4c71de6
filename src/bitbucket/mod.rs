//! BitBucket Server pull request feedback.
//!
//! Three independent components share one injected [`Transport`]:
//! [`CommentReconciler`] for comments, [`CommitLister`] for the commit list
//! and [`BuildStatusReporter`] for build statuses. Each call is awaited to
//! completion before the next one starts.

pub mod comments;
pub mod commits;
pub mod outcome;
pub mod status;
pub mod transport;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_support;

pub use comments::{Anchor, Author, Comment, CommentReconciler, Opaque};
pub use commits::CommitLister;
pub use outcome::{FAILURE_CODE, Outcome};
pub use status::{BuildState, BuildStatusReporter};
pub use transport::{HttpResponse, HttpTransport, Reply, Transport, TransportFailure};
