use serde::{Deserialize, Deserializer, Serialize};

use crate::properties::Properties;

/// Collection path of the label endpoints.
pub const LABELS_PATH: &str = "/api/v2/labels";

/// A named annotation carrying a free-form string property bag.
///
/// A label with an empty `id` is a local draft; a non-empty `id` means the
/// service has persisted it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl Label {
    /// A draft with the given name and no properties.
    pub fn draft(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            properties: Properties::new(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Body of a create request. Never carries an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLabel {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl From<&Label> for CreateLabel {
    fn from(draft: &Label) -> Self {
        Self {
            name: draft.name.clone(),
            properties: draft.properties.clone(),
        }
    }
}

/// Body of an update request.
///
/// `properties` is the caller's full current mapping, applied by the service
/// as a merge patch: empty values remove keys, omitted keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLabel {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl From<&Label> for UpdateLabel {
    fn from(label: &Label) -> Self {
        Self {
            name: label.name.clone(),
            properties: label.properties.clone(),
        }
    }
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelList {
    #[serde(default)]
    pub labels: Vec<Label>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}
