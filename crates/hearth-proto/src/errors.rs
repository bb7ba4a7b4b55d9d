//! Error types for wire encoding and instance-state handling.

use thiserror::Error;

/// Failure to encode or decode a value crossing the engine boundary.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An event could not be encoded to, or decoded from, its JSON wire form.
    #[error("malformed event JSON: {0}")]
    Event(#[source] serde_json::Error),

    /// A configuration object could not be encoded to, or decoded from, JSON.
    #[error("malformed config JSON: {0}")]
    Config(#[source] serde_json::Error),
}

/// Failure while capturing or reconstructing instance state.
///
/// These are recovered locally by the lifecycle adapter: the save or restore
/// cycle is skipped and the condition logged. None of them is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// The save-state response carries no `tag_vec` field.
    #[error("response has no tag_vec field")]
    MissingTagVec,

    /// `tag_vec` is present but not shaped as a list of `[key, value]`
    /// string pairs.
    #[error("tag_vec is not a list of [key, value] string pairs")]
    MalformedTagVec,

    /// An application key collides with the reserved `"keys"` slot.
    #[error("\"keys\" is reserved and cannot be used as an application key")]
    ReservedKey,

    /// The stored key list names a key with no value slot behind it.
    #[error("key list names {key:?} but no value is stored under it")]
    MissingValue {
        /// The dangling key name.
        key: String,
    },
}
