//! Engine call interface and the owned handle.
//!
//! The engine is an external collaborator: a stateful, opaque component that
//! renders markup and computes responses. This module defines the call
//! surface the bridge consumes and the handle type that owns exactly one
//! engine for the lifetime of a screen.

use hearth_proto::{EngineConfig, Event};
use tracing::debug;

use crate::error::BridgeError;

/// The opaque call interface of the external engine.
///
/// Every method may block for the duration of the call; the dispatcher
/// guarantees that no two calls on the same engine ever overlap. Responses
/// are pull-based: `handle_event` and `execute` return nothing, and the
/// result of the most recent call is read back through
/// `last_response_json` / `last_raw`. There is no queue — a consumer that
/// misses a cycle loses that response.
pub trait Engine: Send + Sized + 'static {
    /// Collaborator-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create an engine from its JSON configuration object.
    fn create(config_json: &str) -> Result<Self, Self::Error>;

    /// The markup to display before any event has been handled.
    fn initial_markup(&mut self) -> Result<String, Self::Error>;

    /// Apply a JSON-encoded event to the engine state.
    fn handle_event(&mut self, event_json: &str) -> Result<(), Self::Error>;

    /// Execute a UI-originated invocation body.
    fn execute(&mut self, body: &str) -> Result<(), Self::Error>;

    /// The JSON-encoded response to the most recent event or invocation.
    ///
    /// With no prior call this yields engine-defined default content, not
    /// an error.
    fn last_response_json(&mut self) -> Result<String, Self::Error>;

    /// The most recent raw string the engine produced.
    fn last_raw(&mut self) -> Result<String, Self::Error>;

    /// Whether the most recent response asked the host to shut down.
    fn shutdown_required(&self) -> bool;
}

/// Exclusive owner of one engine.
///
/// The handle is move-only and lives on the dispatcher's background worker;
/// nothing else can reach the engine. [`EngineHandle::destroy`] consumes the
/// handle, so use-after-destroy and double-destroy are unrepresentable at
/// this layer — the worker's `Option` slot is the single control point that
/// calls it.
///
/// Typed [`Event`] values are serialized to their JSON wire form here, at
/// the edge; everything upstream dispatches on the enum.
#[derive(Debug)]
pub struct EngineHandle<E: Engine> {
    engine: E,
}

impl<E: Engine> EngineHandle<E> {
    /// Create the engine and take ownership of it.
    pub fn create(config: &EngineConfig) -> Result<Self, BridgeError> {
        Self::from_factory(config, E::create)
    }

    /// Create the engine through an explicit constructor.
    ///
    /// Test doubles carry scripted behavior that a bare `create(config)`
    /// cannot express, so the constructor is injectable; production code
    /// goes through [`EngineHandle::create`].
    pub fn from_factory<F>(config: &EngineConfig, factory: F) -> Result<Self, BridgeError>
    where
        F: FnOnce(&str) -> Result<E, E::Error>,
    {
        let config_json = config.to_json()?;
        debug!(config = %config_json, "creating engine");
        let engine = factory(&config_json).map_err(BridgeError::create)?;
        debug!("engine created");
        Ok(Self { engine })
    }

    /// Fetch the initial markup.
    pub fn initial_markup(&mut self) -> Result<String, BridgeError> {
        self.engine.initial_markup().map_err(BridgeError::engine)
    }

    /// Submit an event, serializing it at this edge.
    pub fn submit_event(&mut self, event: &Event) -> Result<(), BridgeError> {
        let wire = event.to_json()?;
        debug!(event = %wire, "submitting event");
        self.engine.handle_event(&wire).map_err(BridgeError::engine)
    }

    /// Submit a UI-originated invocation body.
    pub fn submit_invocation(&mut self, body: &str) -> Result<(), BridgeError> {
        debug!(%body, "submitting invocation");
        self.engine.execute(body).map_err(BridgeError::engine)
    }

    /// Pull the latest JSON-encoded response.
    pub fn last_response_json(&mut self) -> Result<String, BridgeError> {
        self.engine.last_response_json().map_err(BridgeError::engine)
    }

    /// Pull the latest raw string.
    pub fn last_raw(&mut self) -> Result<String, BridgeError> {
        self.engine.last_raw().map_err(BridgeError::engine)
    }

    /// Whether the engine has signaled shutdown.
    pub fn shutdown_required(&self) -> bool {
        self.engine.shutdown_required()
    }

    /// Release the engine. Consumes the handle; there is no way to call the
    /// engine afterwards.
    pub fn destroy(self) {
        debug!("destroying engine");
        drop(self.engine);
    }
}
