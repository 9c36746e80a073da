use labels_core::{Label, Properties};
use tokio::runtime::Runtime;

use crate::{ClientError, LabelClient, Transport};

/// Blocking wrapper around the async `LabelClient`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Must not be used from inside another tokio runtime.
pub struct BlockingLabelClient<T> {
    inner: LabelClient<T>,
    rt: Runtime,
}

impl<T: Transport> BlockingLabelClient<T> {
    pub fn new(transport: T) -> std::io::Result<Self> {
        Ok(Self {
            inner: LabelClient::new(transport),
            rt: Runtime::new()?,
        })
    }

    pub fn transport(&self) -> &T {
        self.inner.transport()
    }

    pub fn create_label(&self, name: &str, properties: Properties) -> Result<Label, ClientError> {
        self.rt.block_on(self.inner.create_label(name, properties))
    }

    pub fn create_label_from(&self, draft: &Label) -> Result<Label, ClientError> {
        self.rt.block_on(self.inner.create_label_from(draft))
    }

    pub fn find_label_by_id(&self, id: &str) -> Result<Option<Label>, ClientError> {
        self.rt.block_on(self.inner.find_label_by_id(id))
    }

    pub fn find_labels(&self) -> Result<Vec<Label>, ClientError> {
        self.rt.block_on(self.inner.find_labels())
    }

    pub fn update_label(&self, label: &Label) -> Result<Label, ClientError> {
        self.rt.block_on(self.inner.update_label(label))
    }

    pub fn delete_label(&self, label: &Label) -> Result<(), ClientError> {
        self.rt.block_on(self.inner.delete_label(label))
    }

    pub fn delete_label_by_id(&self, id: &str) -> Result<(), ClientError> {
        self.rt.block_on(self.inner.delete_label_by_id(id))
    }
}
