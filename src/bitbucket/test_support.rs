//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::transport::{HttpResponse, Reply, Transport, TransportFailure};

/// A request observed by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Serves queued replies in order and records every request.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .expect("lock replies")
            .push_back(Ok(HttpResponse {
                status,
                body: body.into(),
            }));
        self
    }

    pub fn fail(self, detail: &str) -> Self {
        self.replies
            .lock()
            .expect("lock replies")
            .push_back(Err(TransportFailure(detail.into())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock calls").clone()
    }

    fn record(&self, call: Call) -> Reply {
        let desc = format!("{} {}", call.method, call.url);
        self.calls.lock().expect("lock calls").push(call);
        self.replies
            .lock()
            .expect("lock replies")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request {desc}"))
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Reply {
        self.record(Call {
            method: "GET",
            url: url.to_owned(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body: None,
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Reply {
        self.record(Call {
            method: "POST",
            url: url.to_owned(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }

    async fn put(&self, url: &str, body: &Value) -> Reply {
        self.record(Call {
            method: "PUT",
            url: url.to_owned(),
            query: Vec::new(),
            body: Some(body.clone()),
        })
    }
}
