//! Host screen for the Hearth engine bridge.
//!
//! A thin shell over [`hearth_bridge::Dispatcher`]: it maps host lifecycle
//! transitions (create, save-state, restore-state, terminate) onto bridge
//! calls, packages initial markup for the UI surface, and exposes the three
//! operations the rendered document's script environment may call.
//!
//! The UI surface itself is an external collaborator behind [`UiSurface`];
//! this crate never renders anything.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod markup;
mod screen;
mod surface;

pub use hearth_bridge::{AppStatus, BridgeError, Dispatcher, Engine};
pub use hearth_proto::{EngineConfig, Event, SavedState};
pub use markup::{MARKUP_ENCODING, MARKUP_MIME, Markup};
pub use screen::Screen;
pub use surface::{SurfaceBindings, UiSurface};
