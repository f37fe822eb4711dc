#![no_main]

use adaptlz::format::TokenReader;
use adaptlz::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Treat the input as a raw token stream and replay it until it breaks.
    // Out-of-range references must surface as errors, never as panics.
    let mut reader = TokenReader::new(data);
    let mut decoder = Decoder::new();

    while let Ok(token) = reader.read_token() {
        if decoder.push(&token).is_err() {
            break;
        }
        // Bound memory on adversarial streams of long matches
        if decoder.len() > 1 << 20 {
            break;
        }
    }
});
