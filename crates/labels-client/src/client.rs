use labels_core::{CreateLabel, Label, LabelList, Properties, UpdateLabel, LABELS_PATH};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::transport::{Request, Response, StatusCategory, Transport};
use crate::ClientError;

/// Create/read/update/delete/list access to labels.
///
/// Holds nothing but the transport; every call is exactly one exchange and
/// nothing is cached between calls.
pub struct LabelClient<T> {
    transport: T,
}

impl<T: Transport> LabelClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn create_label(
        &self,
        name: &str,
        properties: Properties,
    ) -> Result<Label, ClientError> {
        self.create(&CreateLabel {
            name: name.to_string(),
            properties,
        })
        .await
    }

    /// Create from a pre-built draft. Any id on the draft is ignored.
    pub async fn create_label_from(&self, draft: &Label) -> Result<Label, ClientError> {
        self.create(&CreateLabel::from(draft)).await
    }

    async fn create(&self, input: &CreateLabel) -> Result<Label, ClientError> {
        let resp = self
            .transport
            .send(Request::post(LABELS_PATH, encode(input)?))
            .await?;
        let label: Label = decode(expect_success(resp)?)?;
        if label.id.is_empty() {
            return Err(ClientError::Decode("created label has no id".into()));
        }
        info!("created label {} ({})", label.id, label.name);
        Ok(label)
    }

    /// `Ok(None)` when the service has no label with this id.
    pub async fn find_label_by_id(&self, id: &str) -> Result<Option<Label>, ClientError> {
        let path = label_path(id)?;
        let resp = self.transport.send(Request::get(path)).await?;
        match resp.category() {
            StatusCategory::Success => decode(resp).map(Some),
            StatusCategory::NotFound => {
                debug!("label {id} not found");
                Ok(None)
            }
            StatusCategory::Error => Err(remote_error(&resp)),
        }
    }

    /// All labels visible to the caller, in service order.
    pub async fn find_labels(&self) -> Result<Vec<Label>, ClientError> {
        let resp = self.transport.send(Request::get(LABELS_PATH)).await?;
        let list: LabelList = decode(expect_success(resp)?)?;
        Ok(list.labels)
    }

    /// Submit the label's name and its whole current property map.
    ///
    /// The service merges the map into what it has stored: keys with an empty
    /// value are removed, keys left out are kept. Returns the merged label.
    pub async fn update_label(&self, label: &Label) -> Result<Label, ClientError> {
        if label.is_draft() {
            return Err(ClientError::InvalidArgument(
                "cannot update a label that has not been created".into(),
            ));
        }
        let path = label_path(&label.id)?;
        let resp = self
            .transport
            .send(Request::patch(path, encode(&UpdateLabel::from(label))?))
            .await?;
        let updated: Label = decode(expect_success(resp)?)?;
        info!(
            "updated label {} ({} properties)",
            updated.id,
            updated.properties.len()
        );
        Ok(updated)
    }

    pub async fn delete_label(&self, label: &Label) -> Result<(), ClientError> {
        self.delete_label_by_id(&label.id).await
    }

    /// Deleting a label that does not exist succeeds.
    pub async fn delete_label_by_id(&self, id: &str) -> Result<(), ClientError> {
        let path = label_path(id)?;
        let resp = self.transport.send(Request::delete(path)).await?;
        match resp.category() {
            StatusCategory::Success => {
                info!("deleted label {id}");
                Ok(())
            }
            StatusCategory::NotFound => {
                warn!("label {id} already absent, nothing to delete");
                Ok(())
            }
            StatusCategory::Error => Err(remote_error(&resp)),
        }
    }
}

fn label_path(id: &str) -> Result<String, ClientError> {
    if id.is_empty() {
        return Err(ClientError::InvalidArgument("label id is required".into()));
    }
    // "." and ".." would be collapsed by URL normalisation into another path.
    if id == "." || id == ".." || id.contains(['/', '?', '#']) {
        return Err(ClientError::InvalidArgument(format!(
            "label id is not a valid path segment: {id:?}"
        )));
    }
    Ok(format!("{LABELS_PATH}/{id}"))
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::InvalidArgument(format!("encode request: {e}")))
}

fn decode<R: DeserializeOwned>(resp: Response) -> Result<R, ClientError> {
    let body = resp
        .body
        .ok_or_else(|| ClientError::Decode(format!("empty body (status {})", resp.status)))?;
    serde_json::from_value(body).map_err(|e| ClientError::Decode(format!("json decode: {e}")))
}

fn expect_success(resp: Response) -> Result<Response, ClientError> {
    match resp.category() {
        StatusCategory::Success => Ok(resp),
        _ => Err(remote_error(&resp)),
    }
}

fn remote_error(resp: &Response) -> ClientError {
    ClientError::Remote {
        status: resp.status,
        message: resp.error_message(),
    }
}
