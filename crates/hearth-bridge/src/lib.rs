//! Bridge between a host screen and an opaque engine.
//!
//! Every event, invocation, and response pull crosses the engine boundary
//! through one choke point: a single background worker owning the engine
//! handle, fed by a channel. At most one engine call is in flight at a time,
//! and calls execute strictly in submission order.
//!
//! # Architecture
//!
//! ```text
//! foreground context            background worker
//! ──────────────────            ─────────────────
//! Dispatcher::submit_* ──Call──▶ BridgeWorker ──▶ EngineHandle ──▶ Engine
//! Dispatcher::fetch_*  ◀─reply── (one call at a time, in order)
//! ```
//!
//! [`BridgeWorker`] is the pure call processor — it owns the handle, runs
//! the post-invocation shutdown check, and destroys the handle at most once.
//! [`Dispatcher`] wraps it in a thread and a channel. The split keeps the
//! sequencing logic synchronously testable.
//!
//! # Components
//!
//! - [`Engine`]: trait over the external collaborator's call interface
//! - [`EngineHandle`]: move-only owner of one engine; single destructor path
//! - [`AppStatus`]: one-shot `Initial → Started` markup-load gate
//! - [`BridgeWorker`] / [`Call`]: ordered call processing
//! - [`Dispatcher`]: the foreground-facing serialized call surface

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatcher;
mod engine;
mod error;
mod status;
mod worker;

pub use dispatcher::Dispatcher;
pub use engine::{Engine, EngineHandle};
pub use error::BridgeError;
pub use status::AppStatus;
pub use worker::{BridgeWorker, Call, Flow, ShutdownHook};
