pub mod error;
pub mod label;
pub mod properties;
pub mod store;

pub use error::{decode_body, ErrorBody, StoreError};
pub use label::{CreateLabel, Label, LabelList, UpdateLabel, LABELS_PATH};
pub use properties::{apply_merge_patch, merge_patched, Properties, TOMBSTONE};
pub use store::LabelStore;
