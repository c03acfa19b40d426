#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use restyle::{RequestOptions, Service, ServiceBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;

// Common test constants
pub const TEST_USER_AGENT: &str = "restyle-test-agent";
pub const SLOW_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Default)]
struct MockState {
    hits: Arc<AtomicUsize>,
    flaky: Arc<AtomicUsize>,
}

impl MockState {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

async fn health(State(state): State<MockState>) -> Json<Value> {
    state.hit();
    Json(json!({"ok": true}))
}

async fn echo_query(
    State(state): State<MockState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<BTreeMap<String, String>> {
    state.hit();
    Json(query)
}

async fn echo_form(
    State(state): State<MockState>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Json<BTreeMap<String, String>> {
    state.hit();
    Json(form)
}

async fn echo_json(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.hit();
    Json(body)
}

async fn echo_headers(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    state.hit();
    let map = headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                Value::String(v.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect::<serde_json::Map<_, _>>();
    Json(Value::Object(map))
}

async fn upload(State(state): State<MockState>, mut multipart: Multipart) -> Json<Value> {
    state.hit();
    let mut files = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        files.push(json!({
            "field": name,
            "file_name": file_name,
            "content": String::from_utf8_lossy(&bytes),
        }));
    }
    Json(json!({ "files": files }))
}

async fn flaky(State(state): State<MockState>) -> impl IntoResponse {
    state.hit();
    if state.flaky.fetch_add(1, Ordering::SeqCst) == 0 {
        (StatusCode::SERVICE_UNAVAILABLE, "try again").into_response()
    } else {
        Json(json!({"ok": true})).into_response()
    }
}

async fn fail(State(state): State<MockState>) -> impl IntoResponse {
    state.hit();
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn not_found(State(state): State<MockState>) -> impl IntoResponse {
    state.hit();
    (StatusCode::NOT_FOUND, Json(json!({"code": 404, "message": "missing"})))
}

async fn not_modified(State(state): State<MockState>) -> StatusCode {
    state.hit();
    StatusCode::NOT_MODIFIED
}

async fn choices(State(state): State<MockState>) -> impl IntoResponse {
    state.hit();
    (StatusCode::MULTIPLE_CHOICES, "pick")
}

async fn redirect_loop(State(state): State<MockState>) -> Redirect {
    state.hit();
    Redirect::temporary("/loop")
}

async fn moved(State(state): State<MockState>) -> Redirect {
    state.hit();
    Redirect::temporary("/health")
}

async fn slow(State(state): State<MockState>) -> &'static str {
    state.hit();
    tokio::time::sleep(SLOW_DELAY).await;
    "late"
}

/// A local HTTP server for end-to-end tests.
pub struct TestServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests the server has handled.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts the mock server on an ephemeral port.
pub async fn spawn_server() -> TestServer {
    let state = MockState::default();

    let app = Router::new()
        .route("/health", get(health))
        .route("/query", get(echo_query).delete(echo_query))
        .route("/form", post(echo_form).put(echo_form).patch(echo_form))
        .route("/json", post(echo_json).put(echo_json).patch(echo_json))
        .route("/headers", get(echo_headers))
        .route("/upload", post(upload))
        .route("/flaky", get(flaky))
        .route("/fail", get(fail))
        .route("/missing", get(not_found))
        .route("/not-modified", get(not_modified))
        .route("/choices", get(choices))
        .route("/loop", get(redirect_loop))
        .route("/moved", get(moved))
        .route("/slow", get(slow))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        task,
    }
}

/// Installs a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a service pointed at the test server.
pub fn create_test_service(server: &TestServer) -> Service {
    ServiceBuilder::new().base_uri(server.base_url.as_str()).build()
}

/// Options with fast retry backoff.
pub fn fast_retry_options(count: u32) -> RequestOptions {
    RequestOptions::new()
        .retry(count)
        .retry_wait(Duration::from_millis(10))
        .retry_max_wait(Duration::from_millis(20))
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}
