//! Recording dispatcher used by unit tests in place of the network.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;

use super::{ApiRequest, ApiResponse, Dispatch};
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::http::CredentialStore;

type RouteKey = (Method, String);

/// Scripted responses per (method, path). A queue with more than one response is
/// consumed in order; the last response repeats for every later call.
#[derive(Default)]
pub struct MockDispatcher {
    responses: Mutex<HashMap<RouteKey, VecDeque<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockDispatcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond(
            method,
            path,
            ApiResponse::new(status, Bytes::from(body.to_string())),
        );
    }

    pub fn respond_empty(&self, method: Method, path: &str, status: u16) {
        self.respond(method, path, ApiResponse::new(status, Bytes::new()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request_to(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .cloned()
    }
}

#[async_trait]
impl Dispatch for MockDispatcher {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let key = (request.method.clone(), request.path.clone());
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        let response = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| {
            ApiResponse::new(404, Bytes::from_static(br#"{"detail": "no mock response"}"#))
        }))
    }
}

/// API client wired to the given mock.
pub fn client(mock: &Arc<MockDispatcher>) -> ApiClient {
    ApiClient::new(mock.clone(), CredentialStore::default())
}
