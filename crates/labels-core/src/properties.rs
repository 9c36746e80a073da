use std::collections::BTreeMap;

/// String key/value bag attached to a label.
pub type Properties = BTreeMap<String, String>;

/// Value that removes a key when submitted in an update.
pub const TOMBSTONE: &str = "";

/// Apply `patch` to `stored` using the service's merge rules.
///
/// Keys with a non-empty value are set, keys with an empty value are removed,
/// keys absent from `patch` are left as they are.
pub fn apply_merge_patch(stored: &mut Properties, patch: &Properties) {
    for (key, value) in patch {
        if value == TOMBSTONE {
            stored.remove(key);
        } else {
            stored.insert(key.clone(), value.clone());
        }
    }
}

pub fn merge_patched(stored: &Properties, patch: &Properties) -> Properties {
    let mut merged = stored.clone();
    apply_merge_patch(&mut merged, patch);
    merged
}
