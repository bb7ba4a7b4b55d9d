//! Fuzz the save-state response parser and snapshot construction.

#![no_main]

use hearth_proto::SavedState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(tags) = hearth_proto::tags_from_response(text) {
            if let Ok(state) = SavedState::from_tags(&tags) {
                let _ = state.restore_map();
            }
        }
    }
});
