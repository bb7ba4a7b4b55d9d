//! Screen lifecycle integration tests.
//!
//! Tests the full create/save/restore flow over a scripted engine:
//! - initial markup delivered before the `Create` event
//! - at-most-once markup load
//! - instance-state capture and round trip
//! - the skip-and-log recovery paths

use hearth_harness::{CallTrace, EngineCall, RecordingSurface, Script, ScriptedEngine};
use hearth_shell::{AppStatus, SavedState, Screen};

fn create_screen(script: Script, trace: &CallTrace) -> (Screen<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::new();
    let screen = Screen::create_with(surface.clone(), ScriptedEngine::factory(script, trace.clone()))
        .expect("screen should be created");
    (screen, surface)
}

#[test]
fn markup_is_delivered_before_the_create_event() {
    let trace = CallTrace::new();
    let (screen, surface) = create_screen(Script::default(), &trace);
    drop(screen);

    let rendered = surface.rendered();
    assert_eq!(rendered.len(), 1);
    let html = rendered[0].decode().expect("valid payload");
    assert!(!html.is_empty(), "markup must be non-empty");
    assert_eq!(html, "<html><body>ready</body></html>");
    assert_eq!(rendered[0].mime(), "text/html");

    let calls = trace.calls();
    let markup_at = calls
        .iter()
        .position(|c| *c == EngineCall::InitialMarkup)
        .expect("markup fetched");
    let create_at = calls
        .iter()
        .position(|c| *c == EngineCall::HandleEvent(r#""Create""#.to_string()))
        .expect("Create submitted");
    assert!(markup_at < create_at, "markup load precedes the Create event");
}

#[test]
fn markup_loads_at_most_once() {
    let trace = CallTrace::new();
    let (mut screen, surface) = create_screen(Script::default(), &trace);

    assert!(screen.status().is_started());
    for _ in 0..3 {
        screen.load_initial_markup();
    }
    drop(screen);

    assert_eq!(surface.rendered().len(), 1);
    assert_eq!(trace.count_where(|c| *c == EngineCall::InitialMarkup), 1);
}

#[test]
fn failed_markup_fetch_leaves_status_initial() {
    let trace = CallTrace::new();
    let script = Script { fail_initial_markup: true, ..Script::default() };
    let (mut screen, surface) = create_screen(script, &trace);

    // The transition is gated on a successful fetch, so a failing engine
    // leaves the gate open for another attempt.
    assert_eq!(screen.status(), AppStatus::Initial);
    screen.load_initial_markup();
    assert_eq!(screen.status(), AppStatus::Initial);
    drop(screen);

    assert!(surface.rendered().is_empty());
    assert_eq!(trace.count_where(|c| *c == EngineCall::InitialMarkup), 2);
}

#[test]
fn save_then_restore_round_trips() {
    let trace = CallTrace::new();
    let script = Script {
        save_response: r#"{"tag_vec": [["a","1"],["b","2"]]}"#.to_string(),
        ..Script::default()
    };
    let (screen, _surface) = create_screen(script, &trace);

    let mut state = SavedState::new();
    screen.save_state(&mut state);

    assert_eq!(state.key_list(), ["a", "b"]);
    assert_eq!(state.string("a"), Some("1"));
    assert_eq!(state.string("b"), Some("2"));

    screen.restore_state(Some(&state));
    drop(screen);

    let calls = trace.calls();
    assert!(
        calls.contains(&EngineCall::HandleEvent(r#""SaveInstanceState""#.to_string())),
        "save event submitted"
    );
    assert!(
        calls.contains(&EngineCall::HandleEvent(
            r#"{"RestoreInstanceState":{"a":"1","b":"2"}}"#.to_string()
        )),
        "restore event carries the reconstructed mapping"
    );
}

#[test]
fn missing_tag_vec_skips_the_capture() {
    let trace = CallTrace::new();
    // Default script answers SaveInstanceState with a response that has no
    // tag_vec at all.
    let (screen, _surface) = create_screen(Script::default(), &trace);

    let mut state = SavedState::new();
    screen.save_state(&mut state);
    assert!(state.is_empty(), "nothing is persisted for this cycle");

    // A restore attempt with no prior snapshot is a no-op.
    screen.restore_state(Some(&state));
    screen.restore_state(None);
    drop(screen);

    let restores = trace.count_where(
        |c| matches!(c, EngineCall::HandleEvent(json) if json.contains("RestoreInstanceState")),
    );
    assert_eq!(restores, 0, "no restore event submitted");
}

#[test]
fn reserved_key_in_save_data_rejects_the_capture() {
    let trace = CallTrace::new();
    let script = Script {
        save_response: r#"{"tag_vec": [["keys","boom"],["a","1"]]}"#.to_string(),
        ..Script::default()
    };
    let (screen, _surface) = create_screen(script, &trace);

    let mut state = SavedState::new();
    screen.save_state(&mut state);
    drop(screen);

    // The reserved slot is never overwritten and nothing partial lands.
    assert!(state.is_empty());
    assert_eq!(state.string("a"), None);
}

#[test]
fn malformed_tag_vec_skips_the_capture() {
    let trace = CallTrace::new();
    let script =
        Script { save_response: r#"{"tag_vec": "not-a-list"}"#.to_string(), ..Script::default() };
    let (screen, _surface) = create_screen(script, &trace);

    let mut state = SavedState::new();
    screen.save_state(&mut state);
    drop(screen);

    assert!(state.is_empty());
}
