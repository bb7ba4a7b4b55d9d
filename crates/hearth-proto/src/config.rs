//! Engine creation options.

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;

/// Configuration handed to the engine at creation, as a JSON object.
///
/// No options are recognized yet; the object is reserved for future tuning
/// knobs. An empty object must be accepted, and unknown members are ignored
/// so that older hosts keep working against newer engines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {}

impl EngineConfig {
    /// Encode to the JSON object passed to `create`.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Config)
    }

    /// Decode from a JSON object string.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(ProtocolError::Config)
    }
}
