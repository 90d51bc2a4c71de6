//! Error type shared by the library and the `jecket` binary.

use thiserror::Error;

/// Failures that abort a `jecket` operation.
///
/// Pull request feedback calls report their result through
/// [`crate::Outcome`] instead; this enum covers the paths that have no
/// meaningful status/body pair, such as listing commits or loading
/// configuration.
#[derive(Error, Debug)]
pub enum JecketError {
    #[error("URL {url} returned status {status} and invalid body: {body}")]
    InvalidResponse {
        status: u16,
        url: Box<str>,
        body: Box<str>,
    },
    #[error("request to {url} failed: {detail}")]
    Transport { url: Box<str>, detail: Box<str> },
    #[error("failed to build HTTP client: {0}")]
    Client(Box<str>),
    #[error("configuration error: {0}")]
    Config(Box<str>),
    #[error("missing input: {0}")]
    MissingInput(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for JecketError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string().into_boxed_str())
    }
}

impl From<toml::ser::Error> for JecketError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string().into_boxed_str())
    }
}
