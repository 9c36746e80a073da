use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::label::{CreateLabel, Label, UpdateLabel};
use crate::properties::{apply_merge_patch, Properties};

/// In-memory label store with the service's create and merge-update rules.
///
/// Listing returns labels in creation order. An id is never handed out
/// twice, even after the label holding it has been deleted.
#[derive(Debug, Default)]
pub struct LabelStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    labels: Vec<Label>,
    issued: HashSet<String>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, input: &CreateLabel) -> Result<Label, StoreError> {
        if input.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("label name is required".into()));
        }
        let mut properties = Properties::new();
        apply_merge_patch(&mut properties, &input.properties);

        let mut inner = self.lock();
        let id = next_id(&inner.issued, generate_id);
        inner.issued.insert(id.clone());
        let label = Label {
            id,
            name: input.name.clone(),
            properties,
        };
        inner.labels.push(label.clone());
        Ok(label)
    }

    pub fn get(&self, id: &str) -> Option<Label> {
        self.lock().labels.iter().find(|l| l.id == id).cloned()
    }

    pub fn list(&self) -> Vec<Label> {
        self.lock().labels.clone()
    }

    pub fn update(&self, id: &str, update: &UpdateLabel) -> Result<Label, StoreError> {
        let mut inner = self.lock();
        let label = inner
            .labels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !update.name.trim().is_empty() {
            label.name = update.name.clone();
        }
        apply_merge_patch(&mut label.properties, &update.properties);
        Ok(label.clone())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let labels = &mut inner.labels;
        let before = labels.len();
        labels.retain(|l| l.id != id);
        if labels.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().labels.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic mid-mutation leaves both collections intact.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// First generated id that has never been issued.
fn next_id(issued: &HashSet<String>, mut generate: impl FnMut() -> String) -> String {
    loop {
        let candidate = generate();
        if !issued.contains(&candidate) {
            return candidate;
        }
    }
}

/// 16 lowercase hex digits, the same shape the service hands out.
fn generate_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}
