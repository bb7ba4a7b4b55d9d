//! Deterministic test doubles for the Hearth bridge.
//!
//! [`ScriptedEngine`] stands in for the opaque engine collaborator, replying
//! from a plain-data [`Script`]; every call it receives lands in a shared
//! [`CallTrace`], whose in-flight detector is the oracle for the bridge's
//! "no two engine calls overlap" property. [`RecordingSurface`] captures
//! what the shell delivers to the UI side.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scripted;
pub mod surface;
pub mod trace;

pub use scripted::{Script, ScriptError, ScriptedEngine};
pub use surface::RecordingSurface;
pub use trace::{CallTrace, EngineCall, TraceGuard};
