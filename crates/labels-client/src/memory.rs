use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use labels_core::{
    decode_body, CreateLabel, ErrorBody, LabelList, LabelStore, StoreError, UpdateLabel,
    LABELS_PATH,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::transport::{Method, Request, Response, Transport, TransportError};

/// In-process transport backed by a [`LabelStore`].
///
/// Answers with the same status codes and bodies as the HTTP service, so a
/// `LabelClient` behaves identically on top of it.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    store: Arc<LabelStore>,
    requests: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<LabelStore>) -> Self {
        Self {
            store,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn store(&self) -> &Arc<LabelStore> {
        &self.store
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn route(&self, request: Request) -> Response {
        let Some(rest) = request.path.strip_prefix(LABELS_PATH) else {
            return error(404, ErrorBody::path_not_found());
        };
        match (request.method, rest.strip_prefix('/')) {
            (Method::Get, None) if rest.is_empty() => json(
                200,
                &LabelList {
                    labels: self.store.list(),
                },
            ),
            (Method::Post, None) if rest.is_empty() => {
                match decode_body::<CreateLabel>(request.body)
                    .and_then(|input| self.store.create(&input))
                {
                    Ok(label) => json(201, &label),
                    Err(e) => store_error(&e),
                }
            }
            (Method::Get, Some(id)) if is_segment(id) => match self.store.get(id) {
                Some(label) => json(200, &label),
                None => store_error(&StoreError::NotFound(id.to_string())),
            },
            (Method::Patch, Some(id)) if is_segment(id) => {
                match decode_body::<UpdateLabel>(request.body)
                    .and_then(|update| self.store.update(id, &update))
                {
                    Ok(label) => json(200, &label),
                    Err(e) => store_error(&e),
                }
            }
            (Method::Delete, Some(id)) if is_segment(id) => match self.store.delete(id) {
                Ok(()) => Response::new(204, None),
                Err(e) => store_error(&e),
            },
            (_, Some(id)) if is_segment(id) => method_not_allowed(),
            (_, None) if rest.is_empty() => method_not_allowed(),
            _ => error(404, ErrorBody::path_not_found()),
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        debug!("{} {} (memory)", request.method, request.path);
        Ok(self.route(request))
    }
}

fn is_segment(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains('/')
}

fn json<T: Serialize>(status: u16, value: &T) -> Response {
    match serde_json::to_value(value) {
        Ok(body) => Response::new(status, Some(body)),
        Err(e) => error(500, ErrorBody::new("internal error", e.to_string())),
    }
}

fn error(status: u16, body: ErrorBody) -> Response {
    let body = serde_json::to_value(&body).unwrap_or(Value::Null);
    Response::new(status, Some(body))
}

fn store_error(e: &StoreError) -> Response {
    let status = match e {
        StoreError::NotFound(_) => 404,
        StoreError::InvalidInput(_) => 400,
    };
    error(status, ErrorBody::from(e))
}

fn method_not_allowed() -> Response {
    error(405, ErrorBody::method_not_allowed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_get_delete_status_codes() {
        let transport = MemoryTransport::new();

        let created = transport
            .send(Request::post(
                LABELS_PATH,
                json!({ "name": "x", "properties": { "color": "red" } }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status, 201);
        let id = created.body.unwrap()["id"].as_str().unwrap().to_string();

        let path = format!("{LABELS_PATH}/{id}");
        let fetched = transport.send(Request::get(&path)).await.unwrap();
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body.unwrap()["properties"]["color"], "red");

        let deleted = transport.send(Request::delete(&path)).await.unwrap();
        assert_eq!(deleted.status, 204);
        assert!(deleted.body.is_none());

        let again = transport.send(Request::delete(&path)).await.unwrap();
        assert_eq!(again.status, 404);
        assert_eq!(transport.request_count(), 4);
    }

    #[tokio::test]
    async fn list_is_wrapped_in_envelope() {
        let transport = MemoryTransport::new();
        let resp = transport.send(Request::get(LABELS_PATH)).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, Some(json!({ "labels": [] })));
    }

    #[tokio::test]
    async fn bad_bodies_are_rejected() {
        let transport = MemoryTransport::new();

        let missing = Request {
            method: Method::Post,
            path: LABELS_PATH.into(),
            body: None,
        };
        assert_eq!(transport.send(missing).await.unwrap().status, 400);

        let blank = Request::post(LABELS_PATH, json!({ "name": "" }));
        let resp = transport.send(blank).await.unwrap();
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body.unwrap()["message"], "invalid input: label name is required");
    }

    #[tokio::test]
    async fn unknown_routes() {
        let transport = MemoryTransport::new();
        let resp = transport.send(Request::get("/api/v2/buckets")).await.unwrap();
        assert_eq!(resp.status, 404);

        let nested = transport
            .send(Request::get(format!("{LABELS_PATH}/a/b")))
            .await
            .unwrap();
        assert_eq!(nested.status, 404);

        let dotted = transport
            .send(Request::get(format!("{LABELS_PATH}/..")))
            .await
            .unwrap();
        assert_eq!(dotted.status, 404);

        let resp = transport
            .send(Request::delete(LABELS_PATH))
            .await
            .unwrap();
        assert_eq!(resp.status, 405);
    }
}
