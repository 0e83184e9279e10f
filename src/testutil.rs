// src/testutil.rs
// =============================================================================
// Test-only fetch adapter with scripted responses.
//
// Each address gets a queue of responses. Every fetch pops the front; the
// last one stays put and is repeated. Addresses with no script answer 404.
// Every call is recorded so tests can count fetches per address.
// =============================================================================

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use crate::checker::{FetchedPage, Fetcher};
use crate::error::{CrawlError, Result};

/// One scripted answer
#[derive(Debug, Clone)]
pub enum MockResponse {
    Status { code: u16, body: String },
    /// Transport fault: no status at all (like a refused connection)
    Fault,
}

impl MockResponse {
    pub fn status(code: u16) -> Self {
        MockResponse::Status {
            code,
            body: String::new(),
        }
    }

    pub fn html(body: &str) -> Self {
        MockResponse::Status {
            code: 200,
            body: body.to_string(),
        }
    }
}

#[derive(Default)]
struct MockState {
    scripts: HashMap<String, VecDeque<MockResponse>>,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockFetcher {
    state: Arc<Mutex<MockState>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the responses for `url`, in order
    pub fn respond(self, url: &str, responses: Vec<MockResponse>) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(url.to_string(), responses.into());
        self
    }

    /// Scripts a 200 page whose body links to each of `links`
    pub fn page(self, url: &str, links: &[&str]) -> Self {
        let body: String = links
            .iter()
            .map(|link| format!("<a href=\"{link}\">{link}</a>\n"))
            .collect();
        self.respond(url, vec![MockResponse::html(&body)])
    }

    /// Every fetched address, in call order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| *call == url)
            .count()
    }

    fn next_response(&self, url: &str) -> MockResponse {
        let mut state = self.state.lock().unwrap();
        state.calls.push(url.to_string());

        match state.scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(MockResponse::status(404)),
            None => MockResponse::status(404),
        }
    }
}

/// `count` opening anchors that are never closed, all on one line, then
/// some filler text. Large enough to make a naive anchor scan blow up.
pub fn unclosed_anchor_line(count: usize) -> String {
    let mut body: String = (0..count)
        .map(|i| format!(r#"<a href="/p{i}"><span>item {i}</span>"#))
        .collect();
    body.push_str(&"x".repeat(1000));
    body
}

pub struct MockPage {
    status: StatusCode,
    body: String,
}

impl FetchedPage for MockPage {
    fn status(&self) -> StatusCode {
        self.status
    }

    async fn text(self) -> Result<String> {
        Ok(self.body)
    }
}

impl Fetcher for MockFetcher {
    type Page = MockPage;

    async fn fetch(&self, url: &str) -> Result<MockPage> {
        match self.next_response(url) {
            MockResponse::Status { code, body } => Ok(MockPage {
                status: StatusCode::from_u16(code).unwrap(),
                body,
            }),
            MockResponse::Fault => Err(CrawlError::fetch(
                url,
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
        }
    }
}
