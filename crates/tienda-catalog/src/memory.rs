//! In-process stand-in for the product API.
//!
//! Implements the same REST contract as the real service over a map of JSON
//! records, and can be told to fail so error policies can be exercised.
//! Compiled for this crate's tests and, with the `test-support` feature, for
//! other crates' tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

const COLLECTION: &str = "/products";

/// How the fake API should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// No response at all (connection refused).
    Network,
    /// Every request answers with this status and an empty body.
    Status(u16),
}

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<u64, Value>,
    next_id: u64,
    failure: Option<Failure>,
    requests: Vec<ApiRequest>,
}

/// Fake product API holding records in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given records. Each must carry a numeric `id`.
    pub fn with_records(records: impl IntoIterator<Item = Value>) -> Self {
        let transport = Self::new();
        for record in records {
            transport.insert(record);
        }
        transport
    }

    /// Stores a record under its `id`, replacing any previous one.
    pub fn insert(&self, record: Value) {
        let mut state = self.lock();
        let id = record.get("id").and_then(Value::as_u64).unwrap_or(state.next_id + 1);
        state.next_id = state.next_id.max(id);
        state.records.insert(id, record);
    }

    /// Makes every following request fail.
    pub fn fail_with(&self, failure: Failure) {
        self.lock().failure = Some(failure);
    }

    /// Back to normal operation.
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// Current stored record, if any.
    pub fn record(&self, id: u64) -> Option<Value> {
        self.lock().records.get(&id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory transport mutex poisoned")
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> CatalogResult<ApiResponse> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        match state.failure {
            Some(Failure::Network) => {
                return Err(CatalogError::Transport("connection refused".to_string()))
            }
            Some(Failure::Status(status)) => return Ok(ApiResponse::empty(status)),
            None => {}
        }

        let Some(rest) = request.path.strip_prefix(COLLECTION) else {
            return Ok(ApiResponse::empty(404));
        };

        if rest.is_empty() {
            return Ok(match (request.method, request.body) {
                (Method::Get, _) => {
                    let all: Vec<Value> = state.records.values().cloned().collect();
                    ApiResponse::json_body(200, &Value::Array(all))
                }
                (Method::Post, Some(body)) => {
                    state.next_id += 1;
                    let id = state.next_id;
                    let record = with_id(body, id);
                    state.records.insert(id, record.clone());
                    ApiResponse::json_body(201, &record)
                }
                _ => ApiResponse::empty(400),
            });
        }

        let Some(id) = rest.strip_prefix('/').and_then(|s| s.parse::<u64>().ok()) else {
            return Ok(ApiResponse::empty(404));
        };

        Ok(match (request.method, request.body) {
            (Method::Get, _) => match state.records.get(&id) {
                Some(record) => ApiResponse::json_body(200, record),
                None => ApiResponse::empty(404),
            },
            (Method::Put, Some(body)) => {
                if state.records.contains_key(&id) {
                    let record = with_id(body, id);
                    state.records.insert(id, record.clone());
                    ApiResponse::json_body(200, &record)
                } else {
                    ApiResponse::empty(404)
                }
            }
            (Method::Delete, _) => match state.records.remove(&id) {
                Some(record) => ApiResponse::json_body(200, &record),
                None => ApiResponse::empty(404),
            },
            _ => ApiResponse::empty(400),
        })
    }
}

fn with_id(mut body: Value, id: u64) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert("id".to_string(), Value::from(id));
    }
    body
}
