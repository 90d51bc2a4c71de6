//! Test utilities for running a fake BitBucket server.
//!
//! The server answers requests from a queue of canned replies and records
//! every request it receives so tests can assert on method, path, query,
//! headers and body.

use assert_cmd::prelude::*;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{HeaderMap, Request, Response, body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::io::ErrorKind;
use std::path::Path;
use std::{
    collections::VecDeque,
    net::SocketAddr,
    process::Command,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// One request seen by the fake server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Recorded {
    /// Decode the request body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[allow(dead_code, reason = "used only in some tests")]
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("invalid JSON request body")
    }
}

/// Requests recorded so far, in arrival order.
pub type Requests = Arc<Mutex<Vec<Recorded>>>;

/// Handle returned by [`start_bitbucket`] for shutting down the server.
pub struct ShutdownHandle {
    join: JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Signal the server to stop and await shutdown.
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.join.await;
    }
}

fn respond(status: u16, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::from(body))
        .expect("build response")
}

/// Start a server that answers with `replies` in order.
///
/// Requests beyond the queue get `404 No handler`.
///
/// # Errors
///
/// Returns an error if the server fails to bind to a local port.
#[expect(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! uses % internally"
)]
pub async fn start_bitbucket(
    replies: Vec<(u16, String)>,
) -> Result<(SocketAddr, Requests, ShutdownHandle), std::io::Error> {
    let queue = Arc::new(Mutex::new(VecDeque::from(replies)));
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, mut rx) = oneshot::channel();

    let seen = Arc::clone(&requests);
    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                res = listener.accept() => match res {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let queue = Arc::clone(&queue);
                        let seen = Arc::clone(&seen);
                        let service = service_fn(move |req: Request<Incoming>| {
                            let queue = Arc::clone(&queue);
                            let seen = Arc::clone(&seen);
                            async move {
                                let (parts, body) = req.into_parts();
                                let body = body.collect().await.unwrap_or_default().to_bytes();
                                seen.lock().expect("lock requests").push(Recorded {
                                    method: parts.method.to_string(),
                                    path: parts.uri.path().to_owned(),
                                    query: parts.uri.query().map(str::to_owned),
                                    headers: parts.headers,
                                    body,
                                });
                                let next = queue.lock().expect("lock replies").pop_front();
                                let resp = match next {
                                    Some((status, body)) => respond(status, body),
                                    None => respond(404, "No handler".to_owned()),
                                };
                                Ok::<_, std::convert::Infallible>(resp)
                            }
                        });
                        tokio::spawn(async move {
                            let _ = http1::Builder::new().serve_connection(io, service).await;
                        });
                    }
                    Err(e) => {
                        eprintln!("accept error: {e}");
                        match e.kind() {
                            ErrorKind::ConnectionAborted
                            | ErrorKind::ConnectionReset
                            | ErrorKind::Interrupted
                            | ErrorKind::WouldBlock => {}
                            _ => break,
                        }
                    }
                },
                _ = &mut rx => break,
            }
        }
    });

    Ok((addr, requests, ShutdownHandle { join, stop: tx }))
}

/// Snapshot of the requests recorded so far.
///
/// # Panics
///
/// Panics if the request log mutex is poisoned.
#[allow(dead_code, reason = "used only in some tests")]
#[must_use]
pub fn recorded(requests: &Requests) -> Vec<Recorded> {
    requests.lock().expect("lock requests").clone()
}

/// Environment variables the binary reads; cleared so the host does not leak
/// into tests.
const JENKINS_ENV: &[&str] = &[
    "BASE_API_LINK",
    "USERNAME",
    "PASSWD",
    "SLUG",
    "PROJECT_NAME",
    "PROJECT",
    "PULL_REQUEST_ID",
    "PR_ID",
    "GIT_COMMIT",
    "CHECK_AUTHOR",
    "BUILD_URL",
    "JOB_NAME",
    "JECKET_CONFIG_PATH",
];

/// Create a `jecket` command pointed at the fake server.
///
/// `home` is used as working directory and XDG config home so no user
/// config file is picked up.
#[allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    dead_code,
    reason = "helper for integration tests"
)]
pub fn jecket_cmd(addr: SocketAddr, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jecket").expect("binary");
    for key in JENKINS_ENV {
        cmd.env_remove(key);
    }
    cmd.current_dir(home)
        .env("XDG_CONFIG_HOME", home)
        .env("RUST_LOG", "info")
        .env("BASE_API_LINK", format!("http://{addr}"))
        .env("USERNAME", "ci")
        .env("PASSWD", "secret")
        .env("SLUG", "PRJ")
        .env("PROJECT_NAME", "repo")
        .env("PULL_REQUEST_ID", "12");
    cmd
}
