//! Wire format for the Hearth engine bridge.
//!
//! Everything that crosses the engine boundary is a UTF-8 JSON string. Events
//! use the externally tagged encoding: a no-payload variant travels as a bare
//! string (`"Create"`), a payload-carrying variant as a single-key object
//! (`{"RestoreInstanceState": {...}}`). Responses are opaque JSON objects the
//! engine produces; the bridge inspects only the `tag_vec` pair list when
//! capturing instance state.
//!
//! Types in this crate are pure data. Serialization happens at the engine
//! boundary; everything inside the bridge dispatches on the typed values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod errors;
pub mod event;
pub mod state;

pub use config::EngineConfig;
pub use errors::{ProtocolError, StateError};
pub use event::Event;
pub use state::{RESERVED_KEY_LIST, SavedState, tags_from_response};
