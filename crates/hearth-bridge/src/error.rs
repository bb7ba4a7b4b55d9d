//! Bridge error types.

use hearth_proto::ProtocolError;
use thiserror::Error;

/// Failure at the engine boundary.
///
/// Only [`BridgeError::Create`] is fatal for the screen. Everything else is
/// caught at the dispatcher boundary and logged; no engine call is retried.
///
/// The collaborator's own error type never crosses the seam — it is
/// rendered to text at the boundary, which keeps this type independent of
/// whichever engine is plugged in.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The native collaborator could not be initialized. The screen cannot
    /// proceed without a handle.
    #[error("engine creation failed: {0}")]
    Create(String),

    /// The background worker thread could not be started.
    #[error("bridge worker could not be spawned: {0}")]
    Spawn(#[source] std::io::Error),

    /// An engine call failed. Reported by the collaborator, logged by the
    /// dispatcher, never propagated into the foreground context.
    #[error("engine call failed: {0}")]
    Engine(String),

    /// A value could not cross the wire boundary.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The call arrived after the handle was destroyed. This is the
    /// dispatcher's sequencing guard: a destroyed handle is unreachable, so
    /// late calls fail here instead of touching it.
    #[error("bridge already terminated")]
    Terminated,
}

impl BridgeError {
    /// Wrap a collaborator failure during creation.
    pub fn create(err: impl std::error::Error) -> Self {
        Self::Create(err.to_string())
    }

    /// Wrap a collaborator failure during a call.
    pub fn engine(err: impl std::error::Error) -> Self {
        Self::Engine(err.to_string())
    }
}
