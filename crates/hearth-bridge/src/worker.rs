//! Ordered call processing against the engine handle.
//!
//! [`BridgeWorker`] is the sequencing core of the bridge, kept free of
//! threads and channels so its ordering rules can be exercised
//! synchronously. The [`Dispatcher`](crate::Dispatcher) feeds it calls one
//! at a time from a single consumer; processing a call blocks for the
//! duration of the engine work, which is exactly the "one call in flight"
//! discipline.

use std::sync::mpsc::Sender;

use hearth_proto::Event;
use tracing::{debug, warn};

use crate::engine::{Engine, EngineHandle};
use crate::error::BridgeError;

/// Callback invoked (at most once) when the engine signals shutdown after an
/// invocation. Runs on the worker; typically it asks the host to end the
/// hosting screen.
pub type ShutdownHook = Box<dyn FnOnce() + Send>;

/// One unit of engine-facing work.
///
/// Pulls carry a reply channel; fire-and-forget calls carry only their
/// payload. The variants mirror the engine call interface, so dispatch in
/// [`BridgeWorker::process`] is exhaustive.
pub enum Call {
    /// Fetch the initial markup and reply with it.
    InitialMarkup(Sender<Result<String, BridgeError>>),
    /// Submit a lifecycle or synthetic event. No reply, no shutdown check.
    Event(Event),
    /// Submit a UI-originated invocation. No reply; the shutdown check runs
    /// immediately after the call completes.
    Invocation(String),
    /// Pull the latest JSON-encoded response.
    LastResponse(Sender<Result<String, BridgeError>>),
    /// Pull the latest raw string.
    LastRaw(Sender<Result<String, BridgeError>>),
    /// Destroy the handle. Terminal.
    Destroy,
}

/// What the worker loop should do after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing calls.
    Continue,
    /// The handle is gone; stop accepting calls.
    Exit,
}

/// Processes [`Call`]s strictly in the order they are handed in.
///
/// Owns the only [`EngineHandle`] in an `Option` slot: destruction takes the
/// handle out exactly once, and any call that arrives afterwards finds it
/// gone and is rejected without touching the engine.
pub struct BridgeWorker<E: Engine> {
    handle: Option<EngineHandle<E>>,
    on_shutdown: Option<ShutdownHook>,
}

impl<E: Engine> BridgeWorker<E> {
    /// Wrap a freshly created handle.
    pub fn new(handle: EngineHandle<E>, on_shutdown: ShutdownHook) -> Self {
        Self { handle: Some(handle), on_shutdown: Some(on_shutdown) }
    }

    /// Process one call to completion.
    ///
    /// Engine failures are logged here, at the dispatcher boundary, and are
    /// never retried: engine calls are assumed idempotent-unsafe.
    pub fn process(&mut self, call: Call) -> Flow {
        let Some(handle) = self.handle.as_mut() else {
            return Self::reject(call);
        };

        match call {
            Call::InitialMarkup(reply) => {
                let _ = reply.send(handle.initial_markup());
            },
            Call::Event(event) => {
                if let Err(err) = handle.submit_event(&event) {
                    warn!(%err, "event dropped by engine");
                }
            },
            Call::Invocation(body) => {
                if let Err(err) = handle.submit_invocation(&body) {
                    warn!(%err, "invocation failed");
                }
                // The only engine-initiated control signal in the protocol.
                // Checked exactly once, before any other call can intervene.
                if handle.shutdown_required() {
                    debug!("shutdown required, destroying engine");
                    self.destroy_handle();
                    if let Some(hook) = self.on_shutdown.take() {
                        hook();
                    }
                    return Flow::Exit;
                }
            },
            Call::LastResponse(reply) => {
                let _ = reply.send(handle.last_response_json());
            },
            Call::LastRaw(reply) => {
                let _ = reply.send(handle.last_raw());
            },
            Call::Destroy => {
                self.destroy_handle();
                return Flow::Exit;
            },
        }
        Flow::Continue
    }

    /// Destroy the handle if it is still alive. Called by the dispatcher
    /// when the call channel closes without an explicit `Destroy`.
    pub fn finish(&mut self) {
        self.destroy_handle();
    }

    fn destroy_handle(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
    }

    /// A call that arrived after the handle was destroyed. Pulls are
    /// answered with [`BridgeError::Terminated`]; writes are dropped.
    fn reject(call: Call) -> Flow {
        match call {
            Call::InitialMarkup(reply) | Call::LastResponse(reply) | Call::LastRaw(reply) => {
                let _ = reply.send(Err(BridgeError::Terminated));
            },
            Call::Event(event) => warn!(?event, "event after teardown dropped"),
            Call::Invocation(body) => warn!(%body, "invocation after teardown dropped"),
            Call::Destroy => {},
        }
        Flow::Exit
    }
}
