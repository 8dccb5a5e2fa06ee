//! In-process mock of the admin API.
//!
//! Serves scripted `(status, json)` replies per `METHOD path` and records
//! every request it sees.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use dealdesk_client::{ApiClient, ClientConfig, MemoryStorage, SessionStore};
use tokio::net::TcpListener;

/// One request as the server received it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (u16, String)>>,
    captured: Mutex<Vec<Captured>>,
}

pub struct MockApi {
    state: Arc<MockState>,
    pub base_url: String,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });
        Self {
            state,
            base_url: format!("http://{addr}/api"),
        }
    }

    /// Script the reply for `method path` (path without the `/api` prefix).
    pub fn on(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.on_raw(method, path, status, body.to_string());
    }

    pub fn on_raw(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(format!("{method} /api{path}"), (status, body.into()));
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.captured.lock().unwrap().clone()
    }

    pub fn last(&self) -> Captured {
        self.requests().pop().expect("at least one request")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let key = format!("{method} {}", uri.path());
    state.captured.lock().unwrap().push(Captured {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.to_vec(),
    });
    let reply = state.routes.lock().unwrap().get(&key).cloned();
    match reply {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not found."}"#,
        )
            .into_response(),
    }
}

/// Session store over inspectable in-memory storage.
pub struct Stores {
    pub durable: Arc<MemoryStorage>,
    pub cookies: Arc<MemoryStorage>,
    pub ephemeral: Arc<MemoryStorage>,
    pub session: Arc<SessionStore>,
}

pub fn stores() -> Stores {
    let durable = Arc::new(MemoryStorage::new());
    let cookies = Arc::new(MemoryStorage::new());
    let ephemeral = Arc::new(MemoryStorage::new());
    let session = Arc::new(SessionStore::new(
        durable.clone(),
        cookies.clone(),
        ephemeral.clone(),
    ));
    Stores {
        durable,
        cookies,
        ephemeral,
        session,
    }
}

pub fn client(api: &MockApi, stores: &Stores) -> ApiClient {
    let config = ClientConfig::parse(&api.base_url).expect("config");
    ApiClient::new(config, stores.session.clone()).expect("client")
}

/// Put a logged-in session with token `token` into `stores`.
pub fn log_in(stores: &Stores, token: &str) {
    use dealdesk_client::Storage;
    stores.durable.set("access_token", token).unwrap();
    stores.durable.set("refresh_token", "refresh").unwrap();
    stores
        .durable
        .set("user", r#"{"id":1,"email":"admin@example.com"}"#)
        .unwrap();
    stores
        .session
        .cookies()
        .add(dealdesk_client::cookies::access_cookie(token))
        .unwrap();
}
