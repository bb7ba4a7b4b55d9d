//! Engine-signaled shutdown integration tests.
//!
//! The shutdown flag is polled only on the invocation path; when it is set
//! the worker destroys the handle and asks the surface to close the screen.

use std::time::Duration;

use hearth_harness::{CallTrace, EngineCall, RecordingSurface, Script, ScriptedEngine};
use hearth_shell::Screen;

#[test]
fn shutdown_after_invocation_closes_the_screen() {
    let trace = CallTrace::new();
    let script = Script { shutdown_on: Some(r#""Quit""#.to_string()), ..Script::default() };
    let surface = RecordingSurface::new();
    let screen =
        Screen::create_with(surface.clone(), ScriptedEngine::factory(script, trace.clone()))
            .expect("screen should be created");
    let bindings = screen.bindings();

    bindings.execute(r#""Move""#);
    // Pull between invocations to pin the first one's completion.
    assert_eq!(bindings.last_response_json(), r#"{"status":"ok"}"#);
    assert_eq!(surface.close_count(), 0, "no teardown without the signal");

    bindings.execute(r#""Quit""#);
    assert!(surface.wait_for_close(Duration::from_secs(5)), "screen should be closed");
    assert_eq!(surface.close_count(), 1);

    drop(bindings);
    drop(screen);

    assert_eq!(trace.count_where(|c| *c == EngineCall::Released), 1);
    assert_eq!(trace.count_where(|c| *c == EngineCall::ShutdownCheck), 2);
    assert_eq!(trace.calls().last(), Some(&EngineCall::Released));
}

#[test]
fn bindings_degrade_gracefully_after_teardown() {
    let trace = CallTrace::new();
    let script = Script { shutdown_on: Some(r#""Quit""#.to_string()), ..Script::default() };
    let surface = RecordingSurface::new();
    let screen =
        Screen::create_with(surface.clone(), ScriptedEngine::factory(script, trace.clone()))
            .expect("screen should be created");
    let bindings = screen.bindings();

    bindings.execute(r#""Quit""#);
    assert!(surface.wait_for_close(Duration::from_secs(5)));

    // The script environment may keep calling; nothing reaches the engine
    // and nothing panics into the surface's execution context.
    bindings.execute(r#""Move""#);
    assert_eq!(bindings.last_raw(), "");
    assert_eq!(bindings.last_response_json(), "");

    drop(bindings);
    drop(screen);

    let calls = trace.calls();
    let released_at = calls
        .iter()
        .position(|c| *c == EngineCall::Released)
        .expect("engine released");
    assert_eq!(calls.len(), released_at + 1, "no engine call after release");
}

#[test]
fn lifecycle_events_never_trigger_teardown() {
    let trace = CallTrace::new();
    // Even a shutdown-flagged engine is only polled after invocations.
    let script = Script { shutdown_on: Some(r#""Quit""#.to_string()), ..Script::default() };
    let surface = RecordingSurface::new();
    let screen =
        Screen::create_with(surface.clone(), ScriptedEngine::factory(script, trace.clone()))
            .expect("screen should be created");

    let mut state = hearth_shell::SavedState::new();
    screen.save_state(&mut state);
    screen.restore_state(Some(&state));
    drop(screen);

    assert_eq!(surface.close_count(), 0);
    assert_eq!(trace.count_where(|c| *c == EngineCall::ShutdownCheck), 0);
}
