pub mod health;
pub mod labels;

use std::sync::Arc;

use axum::{http::StatusCode, middleware, Json, Router};
use labels_core::{ErrorBody, LabelStore};

use crate::auth::{auth_middleware, AuthConfig};

pub struct InnerAppState {
    pub store: Arc<LabelStore>,
    pub auth: Option<Arc<AuthConfig>>,
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new().merge(health::routes());

    let protected = Router::new()
        .merge(labels::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    public
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(path_not_found)
        .with_state(state)
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed()),
    )
}

async fn path_not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::path_not_found()))
}
