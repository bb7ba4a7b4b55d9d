//! Instance-state persisted layout.
//!
//! A captured snapshot is a flat set of string key→value slots plus one
//! reserved entry, `"keys"`, holding the ordered list of application key
//! names. The pairs come from the engine's save-state response, which is
//! expected to carry them as a list of `[key, value]` pairs under `tag_vec`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::StateError;

/// Name of the reserved slot holding the ordered application key list.
///
/// No application key may equal this literal; a collision would corrupt
/// restoration.
pub const RESERVED_KEY_LIST: &str = "keys";

/// Extract the ordered `[key, value]` pairs from a save-state response.
///
/// The response is an opaque JSON object; only its `tag_vec` field is
/// inspected. A missing field and a wrongly shaped field are distinct
/// errors so the caller can log what actually went wrong, but both mean
/// the same thing: skip this save cycle.
pub fn tags_from_response(json: &str) -> Result<Vec<(String, String)>, StateError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|_| StateError::MalformedTagVec)?;
    let tag_vec = value.get("tag_vec").ok_or(StateError::MissingTagVec)?;
    Vec::<(String, String)>::deserialize(tag_vec.clone()).map_err(|_| StateError::MalformedTagVec)
}

/// A captured instance snapshot in its persisted layout.
///
/// Value slots keep the order the engine reported them in; the reserved
/// key list mirrors that order. Constructed whole via [`SavedState::from_tags`]
/// so a failed capture never leaves a partial snapshot behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedState {
    values: Vec<(String, String)>,
    keys: Vec<String>,
}

impl SavedState {
    /// An empty snapshot, equivalent to "no prior state".
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from the pairs of a save-state response.
    ///
    /// Rejects the whole capture if any pair uses the reserved `"keys"`
    /// name. A key reported twice keeps its last value and its first
    /// position in the key list.
    pub fn from_tags(tags: &[(String, String)]) -> Result<Self, StateError> {
        let mut state = Self::new();
        for (key, value) in tags {
            if key == RESERVED_KEY_LIST {
                return Err(StateError::ReservedKey);
            }
            match state.values.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => value.clone_into(slot),
                None => {
                    state.values.push((key.clone(), value.clone()));
                    state.keys.push(key.clone());
                },
            }
        }
        Ok(state)
    }

    /// Whether the snapshot records no application keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The reserved `"keys"` entry: ordered application key names.
    pub fn key_list(&self) -> &[String] {
        &self.keys
    }

    /// Look up the value slot for one application key.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Reconstruct the key→value mapping submitted on restore.
    ///
    /// Walks the reserved key list rather than the raw slots, so only keys
    /// the capture declared are restored. A list entry equal to the
    /// reserved name is rejected outright rather than merged.
    pub fn restore_map(&self) -> Result<BTreeMap<String, String>, StateError> {
        let mut map = BTreeMap::new();
        for key in &self.keys {
            if key == RESERVED_KEY_LIST {
                return Err(StateError::ReservedKey);
            }
            let value = self.string(key).ok_or_else(|| StateError::MissingValue {
                key: key.clone(),
            })?;
            map.insert(key.clone(), value.to_string());
        }
        Ok(map)
    }
}
