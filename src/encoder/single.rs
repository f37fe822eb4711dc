use tracing::debug;

use super::ChunkCompressor;
use crate::adaptive::select_window;
use crate::error::Result;
use crate::lz77::{build_finder, MatchFinder, Token};
use crate::{ChunkSummary, CompressionConfig};

/// A compressed chunk with its selection metadata
#[derive(Clone, Debug)]
pub struct EncodedChunk {
    pub tokens: Vec<Token>,
    pub summary: ChunkSummary,
}

/// Compress one buffer as a self-contained unit.
///
/// The window is chosen from this buffer's own repetitiveness and passed down
/// explicitly; nothing is remembered for the next call.
pub fn encode_chunk(index: usize, input: &[u8], config: &CompressionConfig) -> Result<EncodedChunk> {
    let (ratio, window_size) = select_window(input, config)?;
    debug!(chunk = index, len = input.len(), ratio, window_size, "selected search window");

    let finder = build_finder(config.match_strategy, input, config.lookahead_size);
    let tokens = encode_with_finder(input, finder.as_ref(), window_size, config.lookahead_size);

    let summary =
        ChunkSummary { index, len: input.len(), ratio, window_size, tokens: tokens.len() };
    Ok(EncodedChunk { tokens, summary })
}

/// Drive `finder` across `input`, emitting one token per step.
///
/// A match carries the byte after it as a trailing literal unless the match
/// filled the whole lookahead. The cursor moves past the match and the
/// trailing literal, so every iteration advances by at least one byte.
pub fn encode_with_finder(
    input: &[u8],
    finder: &dyn MatchFinder,
    window_size: usize,
    lookahead_size: usize,
) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(input.len() / 4 + 1);
    let mut cursor = 0;

    while cursor < input.len() {
        match finder.find(cursor, window_size) {
            Some(m) => {
                let lookahead_len = lookahead_size.min(input.len() - cursor);
                let next = if m.length < lookahead_len { Some(input[cursor + m.length]) } else { None };

                tokens.push(Token::Match { distance: m.distance, length: m.length as u16, next });
                cursor += m.length + usize::from(next.is_some());
            }
            None => {
                tokens.push(Token::Literal(input[cursor]));
                cursor += 1;
            }
        }
    }

    tokens
}

/// Compresses chunks one after another on the calling thread
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleThreadedCompressor;

impl ChunkCompressor for SingleThreadedCompressor {
    fn compress_chunks(&self, input: &[u8], config: &CompressionConfig) -> Result<Vec<EncodedChunk>> {
        input
            .chunks(config.chunk_size)
            .enumerate()
            .map(|(index, chunk)| encode_chunk(index, chunk, config))
            .collect()
    }
}
