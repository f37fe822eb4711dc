//! Per-call window selection from a cheap repetitiveness estimate.

pub mod repetitiveness;
pub mod sizer;

pub use repetitiveness::repetitiveness;
pub use sizer::{window_size, EXPANSION_THRESHOLD};

use crate::error::Result;
use crate::CompressionConfig;

/// Score `buffer` and return `(ratio, window_size)` for compressing it
pub fn select_window(buffer: &[u8], config: &CompressionConfig) -> Result<(f64, usize)> {
    let ratio = repetitiveness(buffer)?;
    Ok((ratio, window_size(ratio, config)))
}
