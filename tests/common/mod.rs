#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_chef::client::ChefConfig;
use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;

pub const TEST_KEY: &str = "sb_publishable_test_key_0123456789";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: &'static str,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub apikey: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    generate_reply: Mutex<Reply>,
    generate_delay: Mutex<Option<Duration>>,
    rows_reply: Mutex<Reply>,
    rows_delay: Mutex<Option<Duration>>,
}

impl MockState {
    fn record(
        &self,
        method: &'static str,
        path: &'static str,
        query: Option<String>,
        headers: &HeaderMap,
        body: String,
    ) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path,
            query,
            authorization: header("authorization"),
            apikey: header("apikey"),
            content_type: header("content-type"),
            body,
        });
    }
}

/// In-process stand-in for the hosted project: the recipe function and the
/// REST endpoint of the `recipes` table. Every request is recorded.
pub struct MockProject {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockProject {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            generate_reply: Mutex::new(Reply::new(500, "no reply configured")),
            generate_delay: Mutex::new(None),
            rows_reply: Mutex::new(Reply::json(200, json!([]))),
            rows_delay: Mutex::new(None),
        });

        let router = Router::new()
            .route("/functions/v1/recipe", post(generate_handler))
            .route("/rest/v1/recipes", get(rows_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock project");
        let addr = listener.local_addr().expect("Mock project has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> ChefConfig {
        ChefConfig::new(self.base_url.clone(), TEST_KEY).expect("Mock config should be valid")
    }

    pub fn reply_to_generate(&self, reply: Reply) {
        *self.state.generate_reply.lock().unwrap() = reply;
    }

    pub fn delay_generate(&self, delay: Duration) {
        *self.state.generate_delay.lock().unwrap() = Some(delay);
    }

    pub fn reply_to_rows(&self, reply: Reply) {
        *self.state.rows_reply.lock().unwrap() = reply;
    }

    pub fn delay_rows(&self, delay: Duration) {
        *self.state.rows_delay.lock().unwrap() = Some(delay);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Waits until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        for _ in 0..200 {
            if self.request_count() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("mock project never received {} requests", count);
    }
}

async fn generate_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.record("POST", "/functions/v1/recipe", None, &headers, body);

    let delay = *state.generate_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let reply = state.generate_reply.lock().unwrap().clone();
    (StatusCode::from_u16(reply.status).unwrap(), reply.body)
}

async fn rows_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    state.record("GET", "/rest/v1/recipes", query, &headers, String::new());

    let delay = *state.rows_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let reply = state.rows_reply.lock().unwrap().clone();
    (StatusCode::from_u16(reply.status).unwrap(), reply.body)
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
