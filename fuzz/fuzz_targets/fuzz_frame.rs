#![no_main]

use adaptlz::{decompress_frame, read_frame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only proceed if it looks like it might be a frame
    if data.len() < 6 || &data[..4] != b"ALZ1" {
        return;
    }

    // Parsing may fail on invalid input - that's OK
    // We're looking for panics/crashes, not errors
    if let Ok(frame) = read_frame(&mut &data[..]) {
        let _ = frame.decode();
    }
    let _ = decompress_frame(&mut &data[..]);
});
