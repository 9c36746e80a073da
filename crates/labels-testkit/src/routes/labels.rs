use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use labels_core::{
    decode_body, CreateLabel, ErrorBody, Label, LabelList, StoreError, UpdateLabel,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::AppState;

type ApiError = (StatusCode, Json<ErrorBody>);

/// JSON body extractor whose rejections are `ErrorBody` 400s.
///
/// Content type is not checked; an empty body counts as missing.
struct JsonBody<T>(T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            to_error(StoreError::InvalidInput(format!("read request body: {e}")))
        })?;
        let body = if bytes.is_empty() {
            None
        } else {
            let value = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                to_error(StoreError::InvalidInput(format!("invalid request body: {e}")))
            })?;
            Some(value)
        };
        decode_body(body).map(JsonBody).map_err(to_error)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v2/labels", get(list_labels).post(create_label))
        .route(
            "/api/v2/labels/{id}",
            get(get_label).patch(update_label).delete(delete_label),
        )
}

async fn list_labels(State(state): State<AppState>) -> Json<LabelList> {
    Json(LabelList {
        labels: state.store.list(),
    })
}

async fn create_label(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateLabel>,
) -> Result<(StatusCode, Json<Label>), ApiError> {
    let label = state.store.create(&input).map_err(to_error)?;
    debug!("created label {}", label.id);
    Ok((StatusCode::CREATED, Json(label)))
}

async fn get_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Label>, ApiError> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| to_error(StoreError::NotFound(id)))
}

async fn update_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<UpdateLabel>,
) -> Result<Json<Label>, ApiError> {
    state.store.update(&id, &update).map(Json).map_err(to_error)
}

async fn delete_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(to_error)
}

fn to_error(e: StoreError) -> ApiError {
    let status = match &e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorBody::from(&e)))
}
