//! The foreground-facing serialized call surface.
//!
//! One background thread owns the engine for the screen's lifetime; a
//! single-consumer channel feeds it. The foreground context never blocks on
//! engine work except for explicit pulls, which wait for exactly one
//! serialized call. There is no timeout or cancellation path: a hung engine
//! call stalls the worker indefinitely, which is an accepted limitation of
//! the bridge rather than a masked failure.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use hearth_proto::{EngineConfig, Event};
use tracing::{debug, error};

use crate::engine::{Engine, EngineHandle};
use crate::error::BridgeError;
use crate::worker::{BridgeWorker, Call, Flow, ShutdownHook};

/// Serializes every engine-facing call onto one background worker.
///
/// Created per screen; dropping it enqueues destruction and joins the
/// worker, so the handle is released exactly once whichever shutdown
/// condition fires first (engine-signaled or host terminate).
pub struct Dispatcher {
    sender: Option<mpsc::Sender<Call>>,
    worker: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Spawn the worker and create the engine on it.
    ///
    /// Blocks until creation settles. A creation failure is fatal for the
    /// screen and is returned here; there is nothing to recover.
    pub fn spawn<E: Engine>(
        config: EngineConfig,
        on_shutdown: ShutdownHook,
    ) -> Result<Self, BridgeError> {
        Self::spawn_with(config, E::create, on_shutdown)
    }

    /// [`Dispatcher::spawn`] with an explicit engine constructor, for
    /// injecting scripted collaborators in tests.
    pub fn spawn_with<E, F>(
        config: EngineConfig,
        factory: F,
        on_shutdown: ShutdownHook,
    ) -> Result<Self, BridgeError>
    where
        E: Engine,
        F: FnOnce(&str) -> Result<E, E::Error> + Send + 'static,
    {
        let (sender, calls) = mpsc::channel::<Call>();
        let (ready, created) = mpsc::channel::<Result<(), BridgeError>>();

        let worker = thread::Builder::new()
            .name("hearth-bridge".to_string())
            .spawn(move || {
                let handle = match EngineHandle::from_factory(&config, factory) {
                    Ok(handle) => {
                        let _ = ready.send(Ok(()));
                        handle
                    },
                    Err(err) => {
                        let _ = ready.send(Err(err));
                        return;
                    },
                };
                let mut worker = BridgeWorker::new(handle, on_shutdown);
                while let Ok(call) = calls.recv() {
                    if worker.process(call) == Flow::Exit {
                        break;
                    }
                }
                // Channel closed or loop exited: make sure the engine is
                // released before the thread ends.
                worker.finish();
                debug!("bridge worker finished");
            })
            .map_err(BridgeError::Spawn)?;

        match created.recv() {
            Ok(Ok(())) => Ok(Self { sender: Some(sender), worker: Some(worker) }),
            Ok(Err(err)) => Err(err),
            // Worker died before reporting; treat as terminated at birth.
            Err(_) => Err(BridgeError::Terminated),
        }
    }

    /// Submit an event. Fire-and-forget: the engine's result is retrievable
    /// later via [`Dispatcher::fetch_last_response`].
    pub fn submit_event(&self, event: Event) -> Result<(), BridgeError> {
        self.send(Call::Event(event))
    }

    /// Submit a UI-originated invocation body. Fire-and-forget for the
    /// caller; the worker checks the engine's shutdown flag right after the
    /// call completes and tears the bridge down if it is set.
    pub fn submit_invocation(&self, body: impl Into<String>) -> Result<(), BridgeError> {
        self.send(Call::Invocation(body.into()))
    }

    /// Pull the initial markup. Blocks for one serialized call.
    ///
    /// The protocol does not forbid repeated calls; the at-most-once policy
    /// belongs to the lifecycle adapter and its status gate.
    pub fn fetch_initial_markup(&self) -> Result<String, BridgeError> {
        self.pull(Call::InitialMarkup)
    }

    /// Pull the latest JSON-encoded response. Blocks for one serialized call.
    pub fn fetch_last_response(&self) -> Result<String, BridgeError> {
        self.pull(Call::LastResponse)
    }

    /// Pull the latest raw string. Blocks for one serialized call.
    pub fn fetch_last_raw(&self) -> Result<String, BridgeError> {
        self.pull(Call::LastRaw)
    }

    fn pull(
        &self,
        make: impl FnOnce(mpsc::Sender<Result<String, BridgeError>>) -> Call,
    ) -> Result<String, BridgeError> {
        let (reply, result) = mpsc::channel();
        self.send(make(reply))?;
        result.recv().map_err(|_| BridgeError::Terminated)?
    }

    fn send(&self, call: Call) -> Result<(), BridgeError> {
        self.sender
            .as_ref()
            .ok_or(BridgeError::Terminated)?
            .send(call)
            .map_err(|_| BridgeError::Terminated)
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            // Best effort: the worker may already have torn down after an
            // engine-signaled shutdown.
            let _ = sender.send(Call::Destroy);
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("bridge worker panicked during teardown");
            }
        }
    }
}
