//! The UI surface seam and its script bindings.

use std::sync::Arc;

use hearth_bridge::Dispatcher;
use tracing::warn;

use crate::markup::Markup;

/// A script-capable document renderer hosted by the screen.
///
/// The surface is an external collaborator; the shell drives it through
/// exactly two call shapes. `close_screen` may be invoked from the bridge's
/// background worker, so implementations must be shareable across threads.
pub trait UiSurface: Send + Sync + 'static {
    /// Display the given markup.
    fn render_markup(&self, markup: &Markup);

    /// End the hosting screen. Invoked after the engine signals shutdown
    /// and its handle has been destroyed.
    fn close_screen(&self);
}

/// The three operations reachable by name from the rendered document's
/// script environment.
///
/// Each forwards onto the bridge's single serialized call path and blocks
/// the calling context for at most the duration of that one call. Failures
/// are logged and surfaced as default values; nothing here can panic into
/// the surface's execution context.
pub struct SurfaceBindings {
    dispatcher: Arc<Dispatcher>,
}

impl SurfaceBindings {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Submit a UI-originated invocation body.
    ///
    /// Fire-and-forget: the surface pulls the outcome later via
    /// [`SurfaceBindings::last_response_json`]. If this invocation makes
    /// the engine signal shutdown, the worker destroys the handle and asks
    /// the surface to close the screen.
    pub fn execute(&self, body: &str) {
        if let Err(err) = self.dispatcher.submit_invocation(body) {
            warn!(%err, "invocation not accepted");
        }
    }

    /// Pull the latest raw string the engine produced.
    pub fn last_raw(&self) -> String {
        self.dispatcher.fetch_last_raw().unwrap_or_else(|err| {
            warn!(%err, "last raw unavailable");
            String::new()
        })
    }

    /// Pull the latest JSON-encoded response.
    pub fn last_response_json(&self) -> String {
        self.dispatcher.fetch_last_response().unwrap_or_else(|err| {
            warn!(%err, "last response unavailable");
            String::new()
        })
    }
}
