//! Event vocabulary for the engine bridge.
//!
//! Events are the only write channel into the engine. The enum is dispatched
//! exhaustively inside the bridge and serialized to the JSON wire form only
//! at the engine boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// A state-transition request sent into the engine.
///
/// Wire encoding is externally tagged: `Create` and `SaveInstanceState`
/// travel as bare strings, `RestoreInstanceState` as a single-key object
/// whose value is the key→value mapping being restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The hosting screen has been created and the initial markup delivered.
    Create,

    /// The host is about to capture instance state; the engine's next
    /// response is expected to carry a `tag_vec` pair list.
    SaveInstanceState,

    /// A previously captured key→value mapping is being handed back to the
    /// engine after screen recreation.
    RestoreInstanceState(BTreeMap<String, String>),
}

impl Event {
    /// Encode to the JSON wire form.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Event)
    }

    /// Decode from the JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(ProtocolError::Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_a_bare_string() {
        assert_eq!(Event::Create.to_json().unwrap(), r#""Create""#);
    }

    #[test]
    fn save_instance_state_is_a_bare_string() {
        assert_eq!(Event::SaveInstanceState.to_json().unwrap(), r#""SaveInstanceState""#);
    }

    #[test]
    fn restore_instance_state_is_a_single_key_object() {
        let map =
            BTreeMap::from([("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]);
        let json = Event::RestoreInstanceState(map).to_json().unwrap();
        assert_eq!(json, r#"{"RestoreInstanceState":{"a":"1","b":"2"}}"#);
    }

    #[test]
    fn wire_form_round_trips() {
        let map = BTreeMap::from([("score".to_string(), "42".to_string())]);
        for event in
            [Event::Create, Event::SaveInstanceState, Event::RestoreInstanceState(map)]
        {
            let json = event.to_json().unwrap();
            assert_eq!(Event::from_json(&json).unwrap(), event);
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Event::from_json(r#""Detonate""#).is_err());
    }
}
