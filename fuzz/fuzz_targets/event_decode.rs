//! Fuzz the event wire decoder: arbitrary bytes must never panic it.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = hearth_proto::Event::from_json(text);
    }
});
