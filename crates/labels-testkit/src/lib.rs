//! In-process label service for exercising the HTTP transport end to end.

pub mod auth;
mod routes;
pub mod test_helpers;

use std::sync::Arc;

use axum::Router;
use labels_core::LabelStore;
use tokio::net::TcpListener;

use auth::AuthConfig;
use routes::InnerAppState;

/// Router serving `store` over the label endpoints, open access.
pub fn router(store: Arc<LabelStore>) -> Router {
    routes::build_router(Arc::new(InnerAppState { store, auth: None }))
}

/// Router that rejects requests lacking `Authorization: Token <token>`.
pub fn router_with_token(store: Arc<LabelStore>, token: String) -> Router {
    let auth = Some(Arc::new(AuthConfig { token }));
    routes::build_router(Arc::new(InnerAppState { store, auth }))
}

pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).await
}
