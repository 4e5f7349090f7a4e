// staffdoc-client/tests/common/mod.rs
// In-process fake backend that mimics a json-server style REST API

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Notify;

use staffdoc_client::OneshotHttpClient;

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    next_id: i64,
    requests: Vec<String>,
    omit_total_count: bool,
    fail: bool,
    gates: HashMap<u32, Arc<Notify>>,
}

/// Fake backend state shared between the router and the test body
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<Inner>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().next_id = 1000;
        backend
    }

    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        self.inner
            .lock()
            .unwrap()
            .collections
            .insert(collection.to_string(), records);
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Requests seen so far, formatted as `METHOD uri`
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn omit_total_count(&self, omit: bool) {
        self.inner.lock().unwrap().omit_total_count = omit;
    }

    pub fn fail(&self, fail: bool) {
        self.inner.lock().unwrap().fail = fail;
    }

    /// Hold list responses for `page` until the returned gate is notified
    pub fn gate_page(&self, page: u32) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner.lock().unwrap().gates.insert(page, gate.clone());
        gate
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/{collection}", get(list).post(create))
            .route("/{collection}/{id}", get(fetch).put(replace).delete(remove))
            .with_state(self.clone())
    }

    pub fn client(&self) -> OneshotHttpClient {
        OneshotHttpClient::new(self.router())
    }

    /// Record the request; `Err` carries the canned failure response
    fn enter(&self, method: &str, uri: &Uri) -> Result<(), Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(format!("{} {}", method, uri));
        if inner.fail {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable").into_response());
        }
        Ok(())
    }
}

fn field_matches(record: &Value, key: &str, expected: &str) -> bool {
    match record.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == expected,
        None => false,
    }
}

async fn list(
    State(backend): State<FakeBackend>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    if let Err(resp) = backend.enter("GET", &uri) {
        return resp;
    }
    let page: u32 = params.get("_page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params.get("_limit").and_then(|l| l.parse().ok()).unwrap_or(10);

    let gate = backend.inner.lock().unwrap().gates.get(&page).cloned();
    if let Some(gate) = gate {
        gate.notified().await;
    }

    let inner = backend.inner.lock().unwrap();
    // the backend may have gone down while the response was held
    if inner.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "backend unavailable").into_response();
    }
    let matching: Vec<Value> = inner
        .collections
        .get(&collection)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|record| {
            params
                .iter()
                .filter(|(key, _)| !key.starts_with('_'))
                .all(|(key, value)| field_matches(record, key, value))
        })
        .collect();

    let total = matching.len();
    let start = (page.saturating_sub(1) as usize) * limit;
    let items: Vec<Value> = matching.into_iter().skip(start).take(limit).collect();

    if inner.omit_total_count {
        Json(items).into_response()
    } else {
        ([("x-total-count", total.to_string())], Json(items)).into_response()
    }
}

async fn fetch(
    State(backend): State<FakeBackend>,
    Path((collection, id)): Path<(String, i64)>,
    uri: Uri,
) -> Response {
    if let Err(resp) = backend.enter("GET", &uri) {
        return resp;
    }
    let found = backend
        .inner
        .lock()
        .unwrap()
        .collections
        .get(&collection)
        .and_then(|records| records.iter().find(|r| r["id"] == id).cloned());
    match found {
        Some(record) => Json(record).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn create(
    State(backend): State<FakeBackend>,
    Path(collection): Path<String>,
    uri: Uri,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = backend.enter("POST", &uri) {
        return resp;
    }
    let mut inner = backend.inner.lock().unwrap();
    inner.next_id += 1;
    body["id"] = json!(inner.next_id);
    inner
        .collections
        .entry(collection)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn replace(
    State(backend): State<FakeBackend>,
    Path((collection, id)): Path<(String, i64)>,
    uri: Uri,
    Json(mut body): Json<Value>,
) -> Response {
    if let Err(resp) = backend.enter("PUT", &uri) {
        return resp;
    }
    let mut inner = backend.inner.lock().unwrap();
    let Some(slot) = inner
        .collections
        .get_mut(&collection)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == id))
    else {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    };
    body["id"] = json!(id);
    *slot = body.clone();
    Json(body).into_response()
}

async fn remove(
    State(backend): State<FakeBackend>,
    Path((collection, id)): Path<(String, i64)>,
    uri: Uri,
) -> Response {
    if let Err(resp) = backend.enter("DELETE", &uri) {
        return resp;
    }
    let mut inner = backend.inner.lock().unwrap();
    let Some(records) = inner.collections.get_mut(&collection) else {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    };
    let before = records.len();
    records.retain(|r| r["id"] != id);
    if records.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }
    Json(json!({})).into_response()
}

pub fn employee_json(id: i64, name: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "passport": format!("AB{:07}", id),
        "birthDate": "1990-01-15",
        "gender": if id % 2 == 0 { "female" } else { "male" },
        "isActive": active,
    })
}

pub fn employees(count: i64) -> Vec<Value> {
    (1..=count)
        .map(|id| employee_json(id, &format!("Employee {id}"), id % 3 != 0))
        .collect()
}

pub fn document_json(id: i64, employee_id: i64, doc_type: &str) -> Value {
    json!({
        "id": id,
        "type": doc_type,
        "number": format!("DOC-{id:04}"),
        "date": "2024-02-10",
        "description": format!("Document number {id} for tests"),
        "employeeId": employee_id,
    })
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
