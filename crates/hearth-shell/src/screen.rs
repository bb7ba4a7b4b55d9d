//! Screen lifecycle adapter.
//!
//! Translates host lifecycle transitions into the bridge's event vocabulary
//! and manages the instance-state round trip. The screen owns the context
//! that used to be scattered globals: the dispatcher and the markup-load
//! status gate.

use std::sync::Arc;

use hearth_bridge::{AppStatus, BridgeError, Dispatcher, Engine};
use hearth_proto::{EngineConfig, Event, SavedState, tags_from_response};
use tracing::{debug, warn};

use crate::markup::Markup;
use crate::surface::{SurfaceBindings, UiSurface};

/// One hosting screen: a UI surface wired to one engine through the bridge.
///
/// Creation is fatal-or-complete: a screen that exists holds a live
/// dispatcher. Dropping the screen (host terminate) releases the engine
/// through the same single destroy path the shutdown signal uses.
pub struct Screen<S: UiSurface> {
    surface: Arc<S>,
    dispatcher: Arc<Dispatcher>,
    status: AppStatus,
}

impl<S: UiSurface> Screen<S> {
    /// Create the screen: build the (empty) configuration, create the
    /// engine on the bridge worker, load initial markup exactly once, then
    /// submit the `Create` event.
    pub fn create<E: Engine>(surface: S) -> Result<Self, BridgeError> {
        Self::create_with(surface, E::create)
    }

    /// [`Screen::create`] with an explicit engine constructor, for
    /// injecting scripted collaborators in tests.
    pub fn create_with<E, F>(surface: S, factory: F) -> Result<Self, BridgeError>
    where
        E: Engine,
        F: FnOnce(&str) -> Result<E, E::Error> + Send + 'static,
    {
        let surface = Arc::new(surface);
        let closer = Arc::clone(&surface);
        let config = EngineConfig::default();
        let dispatcher =
            Dispatcher::spawn_with(config, factory, Box::new(move || closer.close_screen()))?;

        let mut screen =
            Self { surface, dispatcher: Arc::new(dispatcher), status: AppStatus::default() };
        screen.load_initial_markup();
        screen.dispatcher.submit_event(Event::Create)?;
        Ok(screen)
    }

    /// Fetch and deliver the initial markup if it has not been loaded yet.
    ///
    /// Safe to call from repeated creation callbacks: the status gate makes
    /// the load-and-transition happen at most once per screen lifetime, and
    /// the transition only happens on a successful fetch.
    pub fn load_initial_markup(&mut self) {
        if self.status.is_started() {
            debug!("markup already loaded, skipping");
            return;
        }
        match self.dispatcher.fetch_initial_markup() {
            Ok(html) => {
                debug!(len = html.len(), "delivering initial markup");
                self.surface.render_markup(&Markup::from_html(&html));
                self.status.advance();
            },
            Err(err) => warn!(%err, "initial markup unavailable"),
        }
    }

    /// Capture instance state into `out`.
    ///
    /// Submits `SaveInstanceState`, pulls the engine's response, and writes
    /// the reported `[key, value]` pairs plus the reserved `"keys"` list.
    /// A response without a well-formed `tag_vec`, or one that uses the
    /// reserved key name, skips the capture for this cycle — nothing
    /// partial is persisted and the condition is logged, not propagated.
    pub fn save_state(&self, out: &mut SavedState) {
        if let Err(err) = self.dispatcher.submit_event(Event::SaveInstanceState) {
            warn!(%err, "save event not accepted");
            return;
        }
        let response = match self.dispatcher.fetch_last_response() {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, "no save response");
                return;
            },
        };
        debug!(%response, "instance state response");
        match tags_from_response(&response).and_then(|tags| SavedState::from_tags(&tags)) {
            Ok(state) => *out = state,
            Err(err) => warn!(%err, "skipping state capture"),
        }
    }

    /// Hand previously captured state back to the engine.
    ///
    /// No prior snapshot (or one that recorded no keys) is a no-op: no
    /// event is submitted. A snapshot whose key list cannot be
    /// reconstructed is logged and skipped.
    pub fn restore_state(&self, saved: Option<&SavedState>) {
        let Some(saved) = saved else { return };
        if saved.is_empty() {
            debug!("no keys recorded, nothing to restore");
            return;
        }
        match saved.restore_map() {
            Ok(map) => {
                if let Err(err) = self.dispatcher.submit_event(Event::RestoreInstanceState(map)) {
                    warn!(%err, "restore event not accepted");
                }
            },
            Err(err) => warn!(%err, "state not restorable"),
        }
    }

    /// Bindings for the rendered document's script environment.
    pub fn bindings(&self) -> SurfaceBindings {
        SurfaceBindings::new(Arc::clone(&self.dispatcher))
    }

    /// The hosted surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Current markup-load status.
    pub fn status(&self) -> AppStatus {
        self.status
    }
}
