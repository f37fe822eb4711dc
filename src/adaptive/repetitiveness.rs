use crate::error::{Error, Result};

/// Fraction of positions that repeat the byte immediately before them.
///
/// Only consecutive runs count; longer-period repeats such as "abab" score 0.
/// The denominator is the full buffer length, so a single byte scores 0.
pub fn repetitiveness(buffer: &[u8]) -> Result<f64> {
    if buffer.is_empty() {
        return Err(Error::InvalidInput(
            "cannot estimate repetitiveness of an empty buffer".to_string(),
        ));
    }

    let repeats = buffer.windows(2).filter(|pair| pair[0] == pair[1]).count();
    Ok(repeats as f64 / buffer.len() as f64)
}
