pub mod parallel;
pub mod single;

pub use parallel::ParallelCompressor;
pub use single::{encode_chunk, encode_with_finder, EncodedChunk, SingleThreadedCompressor};

use std::io::Write;

use crate::error::Result;
use crate::format::FrameWriter;
use crate::lz77::Token;
use crate::{CompressionConfig, CompressionStats};

/// Trait for compressing an input as a sequence of independent chunks
pub trait ChunkCompressor {
    /// Compress `input` in `config.chunk_size` slices, returning them in input order
    fn compress_chunks(&self, input: &[u8], config: &CompressionConfig) -> Result<Vec<EncodedChunk>>;
}

/// LZ77 encoder with adaptive window sizing.
///
/// The configuration is fixed at construction; every call chooses its own
/// window, so one encoder can be shared across threads.
#[derive(Clone, Debug)]
pub struct Encoder {
    config: CompressionConfig,
}

impl Encoder {
    /// Create an encoder with the given window bounds and chunk size
    pub fn new(base_window_size: usize, max_window_size: usize, chunk_size: usize) -> Result<Self> {
        Self::with_config(CompressionConfig {
            base_window_size,
            max_window_size,
            chunk_size,
            ..Default::default()
        })
    }

    /// Create an encoder from a full configuration
    pub fn with_config(config: CompressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `input` as a single unit.
    ///
    /// Fails with `InvalidInput` on an empty buffer, since there is nothing to
    /// estimate the window from.
    pub fn compress(&self, input: &[u8]) -> Result<Vec<Token>> {
        Ok(encode_chunk(0, input, &self.config)?.tokens)
    }

    /// Compress `input` in independent chunks of at most `chunk_size` bytes.
    ///
    /// An empty input has no chunks and yields an empty token stream.
    pub fn compress_with_chunks(&self, input: &[u8]) -> Result<Vec<Token>> {
        Ok(self.compress_with_stats(input)?.0)
    }

    /// Chunked compression that also reports per-chunk window decisions
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<Token>, CompressionStats)> {
        let chunks = if self.config.num_threads == 1 {
            SingleThreadedCompressor.compress_chunks(input, &self.config)?
        } else {
            ParallelCompressor::new(self.config.num_threads).compress_chunks(input, &self.config)?
        };

        let mut stats = CompressionStats::default();
        let mut tokens = Vec::with_capacity(chunks.iter().map(|c| c.tokens.len()).sum());
        for chunk in chunks {
            stats.record_chunk(&chunk.tokens, chunk.summary, self.config.base_window_size);
            tokens.extend(chunk.tokens);
        }

        Ok((tokens, stats))
    }

    /// Chunk-compress `input` and write it as a checksummed frame
    pub fn compress_to_writer<W: Write>(&self, input: &[u8], output: W) -> Result<CompressionStats> {
        let (tokens, stats) = self.compress_with_stats(input)?;
        let mut writer = FrameWriter::new(output);
        writer.write_frame(&tokens, input)?;
        writer.finish()?;
        Ok(stats)
    }
}
