//! Configuration document server for HTTP tests
//!
//! Serves `/project_config.json` from an axum router bound to an ephemeral
//! port, recording every hit and the cache headers it was sent.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
    cache_control: Arc<Mutex<Option<String>>>,
}

async fn serve_document(State(state): State<ServerState>, headers: HeaderMap) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let cache_control = headers
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.cache_control.lock().unwrap() = cache_control;

    (state.status, state.body.clone())
}

/// Running configuration document server
pub struct ConfigServer {
    /// Page base URL; the document lives at `<base_url>project_config.json`
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    cache_control: Arc<Mutex<Option<String>>>,
    handle: JoinHandle<()>,
}

impl ConfigServer {
    /// Start serving `body` with `status`
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let cache_control = Arc::new(Mutex::new(None));
        let state = ServerState {
            status,
            body: body.to_string(),
            hits: hits.clone(),
            cache_control: cache_control.clone(),
        };

        let app = Router::new()
            .route("/project_config.json", get(serve_document))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind ephemeral port");
        let addr = listener.local_addr().expect("Should have local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{}/", addr),
            hits,
            cache_control,
            handle,
        }
    }

    pub async fn json(body: &str) -> Self {
        Self::start(StatusCode::OK, body).await
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_cache_control(&self) -> Option<String> {
        self.cache_control.lock().unwrap().clone()
    }
}

impl Drop for ConfigServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local address");
    drop(listener);
    format!("http://{}/", addr)
}
