//! Recording surface double.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use hearth_shell::{Markup, UiSurface};

/// Surface double capturing everything the shell delivers.
///
/// Clones share state, so a test can keep one clone and hand the other to
/// the screen. Close requests arrive from the bridge worker, so waiting for
/// one is condvar-based rather than polled.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<SurfaceState>,
}

#[derive(Default)]
struct SurfaceState {
    rendered: Mutex<Vec<Markup>>,
    closed: Mutex<usize>,
    close_signal: Condvar,
}

impl RecordingSurface {
    /// A fresh surface with nothing rendered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every markup delivery, in order.
    pub fn rendered(&self) -> Vec<Markup> {
        self.inner.rendered.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// How many times the screen was asked to close.
    pub fn close_count(&self) -> usize {
        *self.inner.closed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the screen has been asked to close at least once.
    /// Returns `false` on timeout.
    pub fn wait_for_close(&self, timeout: Duration) -> bool {
        let closed = self.inner.closed.lock().unwrap_or_else(PoisonError::into_inner);
        let (closed, _result) = self
            .inner
            .close_signal
            .wait_timeout_while(closed, timeout, |count| *count == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *closed > 0
    }
}

impl UiSurface for RecordingSurface {
    fn render_markup(&self, markup: &Markup) {
        self.inner.rendered.lock().unwrap_or_else(PoisonError::into_inner).push(markup.clone());
    }

    fn close_screen(&self) {
        *self.inner.closed.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        self.inner.close_signal.notify_all();
    }
}
