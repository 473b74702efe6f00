//! In-process HTTP server standing in for the model endpoint in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Hit {
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Canned answer for a path.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
    content_type: &'static str,
    delay: Option<Duration>,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    pub fn text(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            content_type: "text/html",
            delay: None,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct ServerState {
    routes: Arc<HashMap<String, Reply>>,
    fallback: Option<Reply>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct TestServer {
    /// Base address including the `/v1` version path.
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl TestServer {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

/// Serve `reply` for every path.
pub async fn spawn(reply: Reply) -> TestServer {
    start(HashMap::new(), Some(reply)).await
}

/// Serve a reply per path (e.g. `/v1/model/list`); other paths answer 404.
pub async fn spawn_routes(routes: &[(&str, Reply)]) -> TestServer {
    let routes = routes
        .iter()
        .map(|(path, reply)| (path.to_string(), reply.clone()))
        .collect();
    start(routes, None).await
}

/// A base address where nothing is listening.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

async fn start(routes: HashMap<String, Reply>, fallback: Option<Reply>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        routes: Arc::new(routes),
        fallback,
        hits: Arc::clone(&hits),
    };
    let app = Router::new().fallback(record).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    TestServer {
        base_url: format!("http://{addr}/v1"),
        hits,
    }
}

async fn record(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.hits.lock().unwrap().push(Hit {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_text(header::AUTHORIZATION),
        content_type: header_text(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    let Some(reply) = state
        .routes
        .get(uri.path())
        .or(state.fallback.as_ref())
        .cloned()
    else {
        return (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).into_response();
    };
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}
