//! In-process fake network layer
//!
//! [`MockTransport`] records every request it receives and answers from a
//! queue of canned outcomes. When the queue is empty it answers `200` with
//! an empty successful envelope.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::transport::{ApiRequest, RawResponse, Transport};

enum Outcome {
    Respond(RawResponse),
    Fail(String),
}

#[derive(Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    outcomes: VecDeque<Outcome>,
}

/// Recording transport for tests
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response
    pub fn respond_json(&self, status: u16, body: serde_json::Value) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .lock()
            .outcomes
            .push_back(Outcome::Respond(RawResponse::json(status, &body)));
        self
    }

    /// Queue a raw response
    pub fn respond(&self, response: RawResponse) -> &Self {
        self.state
            .lock()
            .outcomes
            .push_back(Outcome::Respond(response));
        self
    }

    /// Queue a network-level failure
    pub fn fail(&self, reason: impl Into<String>) -> &Self {
        self.state
            .lock()
            .outcomes
            .push_back(Outcome::Fail(reason.into()));
        self
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.lock().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let mut state = self.state.lock();
        state.requests.push(request);

        match state.outcomes.pop_front() {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(reason)) => Err(Error::Transport(reason)),
            None => Ok(RawResponse::json(
                StatusCode::OK,
                &serde_json::json!({ "success": true, "message": "", "data": null }),
            )),
        }
    }
}
