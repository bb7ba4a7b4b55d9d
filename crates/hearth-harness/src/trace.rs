//! Engine call tracing.
//!
//! The trace records every call crossing the engine boundary, in the order
//! the engine observed them, and counts overlapping entries. The bridge
//! promises at most one call in flight per handle; a nonzero overlap count
//! is a broken bridge, whatever the recorded order looks like.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// One call observed at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// Engine construction from a config object.
    Create,
    /// Initial markup fetch.
    InitialMarkup,
    /// An event, carrying its JSON wire form.
    HandleEvent(String),
    /// A UI-originated invocation, carrying its body.
    Execute(String),
    /// Pull of the latest JSON response.
    LastResponseJson,
    /// Pull of the latest raw string.
    LastRaw,
    /// Post-invocation shutdown flag check.
    ShutdownCheck,
    /// The engine value was released.
    Released,
}

/// Shared, clonable recorder of engine calls.
#[derive(Clone, Default)]
pub struct CallTrace {
    inner: Arc<TraceState>,
}

#[derive(Default)]
struct TraceState {
    calls: Mutex<Vec<EngineCall>>,
    in_flight: AtomicBool,
    overlaps: AtomicUsize,
}

impl CallTrace {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record entry into an engine call. The call is considered in flight
    /// until the returned guard drops; entering while another call is still
    /// in flight bumps the overlap count.
    pub fn enter(&self, call: EngineCall) -> TraceGuard {
        if self.inner.in_flight.swap(true, Ordering::SeqCst) {
            self.inner.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        self.inner
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        TraceGuard { state: Arc::clone(&self.inner) }
    }

    /// All recorded calls, in the order the engine observed them.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// How many recorded calls match the predicate.
    pub fn count_where(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }

    /// How many calls entered while another one was still in flight.
    pub fn overlaps(&self) -> usize {
        self.inner.overlaps.load(Ordering::SeqCst)
    }
}

/// Marks the traced call finished when dropped.
pub struct TraceGuard {
    state: Arc<TraceState>,
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        self.state.in_flight.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let trace = CallTrace::new();
        trace.enter(EngineCall::Create);
        trace.enter(EngineCall::InitialMarkup);
        assert_eq!(trace.calls(), [EngineCall::Create, EngineCall::InitialMarkup]);
        assert_eq!(trace.overlaps(), 0);
    }

    #[test]
    fn detects_overlapping_entries() {
        let trace = CallTrace::new();
        let outer = trace.enter(EngineCall::Execute("a".into()));
        let inner = trace.enter(EngineCall::ShutdownCheck);
        drop(inner);
        drop(outer);
        assert_eq!(trace.overlaps(), 1);
    }

    #[test]
    fn sequential_entries_do_not_overlap() {
        let trace = CallTrace::new();
        for _ in 0..4 {
            trace.enter(EngineCall::LastRaw);
        }
        assert_eq!(trace.overlaps(), 0);
        assert_eq!(trace.count_where(|c| *c == EngineCall::LastRaw), 4);
    }
}
