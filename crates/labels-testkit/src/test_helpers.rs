use std::sync::Arc;

use axum::Router;
use labels_core::LabelStore;
use tokio::net::TcpListener;
use tracing::error;

/// Open-access router over a fresh store.
pub fn test_router() -> Router {
    crate::router(Arc::new(LabelStore::new()))
}

/// Router with token auth enabled, returning (router, token).
pub fn test_router_with_token() -> (Router, String) {
    let token = crate::auth::generate_token();
    let router = crate::router_with_token(Arc::new(LabelStore::new()), token.clone());
    (router, token)
}

/// A running test server with base_url, its store and background task handle.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<LabelStore>,
    _handle: tokio::task::JoinHandle<()>,
}

/// Spawn an open-access test server on a random port.
pub async fn spawn_test_server() -> TestServer {
    let store = Arc::new(LabelStore::new());
    spawn(crate::router(store.clone()), store).await
}

/// Spawn a token-protected test server, returning (server, token).
pub async fn spawn_test_server_with_token() -> (TestServer, String) {
    let store = Arc::new(LabelStore::new());
    let token = crate::auth::generate_token();
    let app = crate::router_with_token(store.clone(), token.clone());
    (spawn(app, store).await, token)
}

async fn spawn(app: Router, store: Arc<LabelStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");
    let handle = tokio::spawn(async move {
        if let Err(e) = crate::serve(listener, app).await {
            error!("test server failed: {e}");
        }
    });
    TestServer {
        base_url,
        store,
        _handle: handle,
    }
}
