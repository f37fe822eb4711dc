#![no_main]

use adaptlz::{decompress, decompress_frame, CompressionConfig, Encoder, MatchStrategy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the configuration, the rest is the payload
    if data.len() < 2 {
        return;
    }
    let base_window = 1 + (data[0] as usize % 64) * 16;
    let chunk_size = 1 + (data[1] as usize) * 8;
    let payload = &data[2..];

    // Limit data size to avoid slowdowns
    let payload = if payload.len() > 16 * 1024 { &payload[..16 * 1024] } else { payload };

    let config = CompressionConfig {
        base_window_size: base_window,
        max_window_size: base_window * 2,
        chunk_size,
        match_strategy: if data[0] & 1 == 0 {
            MatchStrategy::ByteIndex
        } else {
            MatchStrategy::BruteForce
        },
        ..Default::default()
    };
    let encoder = Encoder::with_config(config).unwrap();

    let tokens = encoder.compress_with_chunks(payload).unwrap();
    assert_eq!(decompress(&tokens).unwrap(), payload, "Round-trip mismatch");

    // Same bytes through the framed path
    let mut framed = Vec::new();
    encoder.compress_to_writer(payload, &mut framed).unwrap();
    assert_eq!(decompress_frame(&mut framed.as_slice()).unwrap(), payload, "Frame mismatch");
});
