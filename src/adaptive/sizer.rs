use crate::CompressionConfig;

/// Repetitiveness above which the window is doubled
pub const EXPANSION_THRESHOLD: f64 = 0.5;

/// Map a repetitiveness ratio to the search window for one compression call.
///
/// This is a two-level step: highly repetitive input gets twice the base
/// window (capped at the configured maximum), everything else gets the base.
pub fn window_size(ratio: f64, config: &CompressionConfig) -> usize {
    if ratio > EXPANSION_THRESHOLD {
        config.base_window_size.saturating_mul(2).min(config.max_window_size)
    } else {
        config.base_window_size
    }
}
