use crate::error::{Error, Result};
use crate::lz77::{uncompressed_len, Token, MAX_MATCH_LENGTH};

/// Upper bound on the buffer reserved before any token is replayed
const MAX_PREALLOC: usize = 1 << 24;

/// Replays tokens into a growing output buffer.
///
/// Tokens must be pushed in stream order; each back-reference reads from the
/// bytes produced so far.
#[derive(Debug, Default)]
pub struct Decoder {
    output: Vec<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `capacity` bytes, capped at 16 MiB; the hint often
    /// comes from untrusted length fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity.min(MAX_PREALLOC)) }
    }

    /// Apply a single token
    pub fn push(&mut self, token: &Token) -> Result<()> {
        match *token {
            Token::Literal(byte) => self.output.push(byte),
            Token::Match { distance, length, next } => {
                if length as usize > MAX_MATCH_LENGTH {
                    return Err(Error::InvalidMatchLength(length as u64));
                }
                self.copy_back(distance, length as usize)?;
                if let Some(byte) = next {
                    self.output.push(byte);
                }
            }
        }
        Ok(())
    }

    /// Append `length` bytes starting `distance` bytes back.
    ///
    /// distance=1 is the last byte produced; a length past the distance
    /// repeats the source pattern.
    fn copy_back(&mut self, distance: usize, length: usize) -> Result<()> {
        let available = self.output.len();
        if distance == 0 || distance > available {
            return Err(Error::OutOfRangeReference { distance, available });
        }

        let start = available - distance;
        if length <= distance {
            // Source lies entirely in existing output
            self.output.extend_from_within(start..start + length);
        } else {
            // RLE: later bytes come from bytes this copy just produced
            self.output.reserve(length);
            for i in 0..length {
                let byte = self.output[start + i];
                self.output.push(byte);
            }
        }
        Ok(())
    }

    /// Bytes produced so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.output
    }
}

/// Reconstruct the original bytes from a token stream
pub fn decompress(tokens: &[Token]) -> Result<Vec<u8>> {
    let mut decoder = Decoder::with_capacity(uncompressed_len(tokens));
    for token in tokens {
        decoder.push(token)?;
    }
    Ok(decoder.finish())
}
