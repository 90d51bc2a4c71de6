//! Result of a pull request feedback call.

use std::fmt;

use super::transport::{HttpResponse, Reply};

/// Status code reported for every failure in the `(code, body)` view.
pub const FAILURE_CODE: i32 = -1;

/// Tagged result returned to callers instead of magic status numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the request with a `2xx` status.
    Success { status: u16, body: String },
    /// The server answered with a non-`2xx` status.
    ProtocolFailure { status: u16, body: String },
    /// No HTTP response was obtained.
    TransportFailure(Box<str>),
    /// The server answered but the body was not the expected structure.
    DecodeFailure(Box<str>),
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Legacy `(code, body)` view.
    ///
    /// Successes keep their status; every failure reports
    /// [`FAILURE_CODE`] with a description.
    #[must_use]
    pub fn into_pair(self) -> (i32, String) {
        match self {
            Self::Success { status, body } => (i32::from(status), body),
            Self::ProtocolFailure { status, body } => (FAILURE_CODE, format!("{status}: {body}")),
            Self::TransportFailure(detail) | Self::DecodeFailure(detail) => {
                (FAILURE_CODE, detail.into_string())
            }
        }
    }
}

impl From<HttpResponse> for Outcome {
    fn from(resp: HttpResponse) -> Self {
        let HttpResponse { status, body } = resp;
        if (200..300).contains(&status) {
            Self::Success { status, body }
        } else {
            Self::ProtocolFailure { status, body }
        }
    }
}

impl From<Reply> for Outcome {
    fn from(reply: Reply) -> Self {
        match reply {
            Ok(resp) => resp.into(),
            Err(failure) => Self::TransportFailure(failure.0),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status, body } => write!(f, "status {status}: {body}"),
            Self::ProtocolFailure { status, body } => {
                write!(f, "server rejected request with status {status}: {body}")
            }
            Self::TransportFailure(detail) => write!(f, "transport failure: {detail}"),
            Self::DecodeFailure(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}
