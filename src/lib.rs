//! Report Jenkins build results to BitBucket Server pull requests.
//!
//! The [`bitbucket`] module holds the three feedback components. Settings
//! are resolved once by [`Settings::resolve`] and passed into each of them
//! together with a [`Transport`].

pub mod bitbucket;
pub mod cli_args;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod settings;
pub mod violations;

pub use bitbucket::{
    BuildState, BuildStatusReporter, CommentReconciler, CommitLister, HttpTransport, Outcome,
    Transport,
};
pub use cli_args::GlobalArgs;
pub use error::JecketError;
pub use settings::{Credentials, Overrides, PullRequestRef, Settings};
pub use violations::ViolationSummary;
