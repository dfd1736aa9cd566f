//! # Mock Loads & Testing Guide
//!
//! [`MockJsonSource`] implements [`JsonSource`] entirely in memory. Tests queue
//! expectations in the order requests will arrive and pick what each one
//! returns, so a component's load can be driven without a network.
//!
//! ## When to use the Mock vs the real source
//!
//! | Feature | MockJsonSource | HttpJsonSource |
//! |---------|----------------|----------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Full, including *when* a reply lands | Depends on the remote |
//! | **Error Injection** | `return_err` | Hard |
//! | **Use Case** | Component and router tests | The demo binary |
//!
//! ## Controlling completion time
//!
//! [`GetExpectationBuilder::return_ok_gated`] hands back a [`LoadGate`]. The
//! request stays pending until the gate is opened, which is how tests tear an
//! instance down while its load is still in flight.
//!
//! ```rust
//! use component_framework::fetch::JsonSource;
//! use component_framework::mock::MockJsonSource;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockJsonSource::new();
//!     mock.expect_get("https://api.example/users/1")
//!         .return_ok(json!({ "name": "Anakin" }));
//!
//!     let body = mock.get("https://api.example/users/1").await.unwrap();
//!     assert_eq!(body["name"], "Anakin");
//!     mock.verify();
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::FetchError;
use crate::fetch::JsonSource;

enum Reply {
    Ready(Result<serde_json::Value, FetchError>),
    Gated {
        gate: oneshot::Receiver<()>,
        response: Result<serde_json::Value, FetchError>,
    },
}

struct Expectation {
    url: String,
    reply: Reply,
}

/// An in-memory [`JsonSource`] with expectation tracking.
#[derive(Clone, Default)]
pub struct MockJsonSource {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockJsonSource {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a GET of `url`.
    pub fn expect_get(&self, url: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            url: url.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl JsonSource for MockJsonSource {
    async fn get(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let expectation = self.expectations.lock().unwrap().pop_front();

        let Some(expectation) = expectation else {
            panic!("Unexpected request: GET {url}");
        };
        assert_eq!(expectation.url, url, "Request URL mismatch");

        match expectation.reply {
            Reply::Ready(response) => response,
            Reply::Gated { gate, response } => {
                // A dropped gate counts as opened.
                let _ = gate.await;
                response
            }
        }
    }
}

/// Builder for GET expectations.
pub struct GetExpectationBuilder {
    url: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl GetExpectationBuilder {
    fn push(self, reply: Reply) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            url: self.url,
            reply,
        });
    }

    /// Sets the expectation to return a successful body.
    pub fn return_ok(self, body: serde_json::Value) {
        self.push(Reply::Ready(Ok(body)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FetchError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Returns `body`, but only once the returned gate is opened.
    pub fn return_ok_gated(self, body: serde_json::Value) -> LoadGate {
        let (open, gate) = oneshot::channel();
        self.push(Reply::Gated {
            gate,
            response: Ok(body),
        });
        LoadGate { open }
    }
}

/// Releases a gated mock reply.
pub struct LoadGate {
    open: oneshot::Sender<()>,
}

impl LoadGate {
    pub fn open(self) {
        let _ = self.open.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_mock_replies_in_order() {
        let mock = MockJsonSource::new();
        mock.expect_get("a").return_ok(json!(1));
        mock.expect_get("b").return_err(FetchError::Status(503));

        assert_eq!(mock.get("a").await, Ok(json!(1)));
        assert_eq!(mock.get("b").await, Err(FetchError::Status(503)));
        assert_eq!(mock.calls(), vec!["a".to_string(), "b".to_string()]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_gated_reply_waits_for_gate() {
        let mock = MockJsonSource::new();
        let gate = mock.expect_get("slow").return_ok_gated(json!({ "ok": true }));

        let source = mock.clone();
        let pending = tokio::spawn(async move { source.get("slow").await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        gate.open();
        assert_eq!(pending.await.unwrap(), Ok(json!({ "ok": true })));
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_leftovers() {
        let mock = MockJsonSource::new();
        mock.expect_get("never").return_ok(json!(null));
        mock.verify();
    }
}
