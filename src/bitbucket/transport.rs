//! Authenticated HTTP access to the BitBucket Server REST API.
//!
//! A [`Transport`] performs exactly one attempt per call and never returns
//! an error type of its own: either the server answered, and the literal
//! status and body come back in an [`HttpResponse`], or the request never
//! completed and a [`TransportFailure`] describes why.

use std::fmt;
use std::future::Future;

use log::{debug, error};
use reqwest::RequestBuilder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::JecketError;
use crate::settings::Credentials;

/// Header BitBucket requires on state-changing REST calls.
pub const NO_CHECK_HEADER: &str = "x-atlassian-token";
const NO_CHECK_VALUE: &str = "no-check";

/// Raw reply from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the `2xx` range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request did not produce an HTTP response (DNS, refused connection,
/// TLS, timeout or an unreadable body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure(pub Box<str>);

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a single HTTP round trip.
pub type Reply = Result<HttpResponse, TransportFailure>;

/// HTTP verbs needed by the pull request components.
pub trait Transport {
    /// Issue a `GET` with `query` appended as URL parameters.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> impl Future<Output = Reply> + Send;
    /// Issue a `POST` with a JSON body.
    fn post(&self, url: &str, body: &Value) -> impl Future<Output = Reply> + Send;
    /// Issue a `PUT` with a JSON body.
    fn put(&self, url: &str, body: &Value) -> impl Future<Output = Reply> + Send;
}

/// [`Transport`] backed by `reqwest` with basic authentication.
pub struct HttpTransport {
    client: reqwest::Client,
    credentials: Credentials,
}

impl HttpTransport {
    /// Build a client that sends the no-check header and `credentials` on
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns [`JecketError::Client`] if the underlying client cannot be
    /// constructed.
    pub fn new(credentials: Credentials) -> Result<Self, JecketError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(NO_CHECK_HEADER),
            HeaderValue::from_static(NO_CHECK_VALUE),
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| JecketError::Client(e.to_string().into_boxed_str()))?;
        Ok(Self {
            client,
            credentials,
        })
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Reply {
        let response = request
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| {
                error!("error occurred while sending {method} request to {url}: {e}");
                TransportFailure(e.to_string().into_boxed_str())
            })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!("error reading {method} response body from {url}: {e}");
            TransportFailure(format!("status {status}; reading body: {e}").into_boxed_str())
        })?;
        debug!("{method} response: status: {status}, content: {body}");
        Ok(HttpResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Reply {
        debug!("GET request: url: {url}, params: {query:?}");
        self.send("GET", url, self.client.get(url).query(query)).await
    }

    async fn post(&self, url: &str, body: &Value) -> Reply {
        debug!("POST request: url: {url}, payload: {body}");
        self.send("POST", url, self.client.post(url).json(body)).await
    }

    async fn put(&self, url: &str, body: &Value) -> Reply {
        debug!("PUT request: url: {url}, payload: {body}");
        self.send("PUT", url, self.client.put(url).json(body)).await
    }
}
