pub mod adaptive;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod lz77;

pub use decoder::{decompress, Decoder};
pub use encoder::{Encoder, ParallelCompressor, SingleThreadedCompressor};
pub use error::{Error, Result};
pub use format::{decompress_frame, is_frame, read_frame, Frame, FrameWriter};
pub use lz77::{Token, MAX_MATCH_LENGTH};

/// Default base search window (32 KiB)
pub const DEFAULT_BASE_WINDOW_SIZE: usize = 32 * 1024;

/// Default maximum search window (128 KiB)
pub const DEFAULT_MAX_WINDOW_SIZE: usize = 128 * 1024;

/// Default chunk size for chunked compression (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// How the encoder searches the window for back-references.
///
/// Both strategies produce identical token streams; they only differ in speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Compare the lookahead against every window offset
    BruteForce,
    /// Only visit window offsets that start with the lookahead's first byte
    #[default]
    ByteIndex,
}

/// Configuration for compression
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionConfig {
    /// Search window used for ordinary input
    pub base_window_size: usize,
    /// Upper bound on the expanded window used for highly repetitive input
    pub max_window_size: usize,
    /// Maximum bytes per independently compressed chunk
    pub chunk_size: usize,
    /// Lookahead capacity, which bounds match length (1-258)
    pub lookahead_size: usize,
    /// Number of threads for chunked compression (0 = auto, 1 = single-threaded)
    pub num_threads: usize,
    /// Match search strategy
    pub match_strategy: MatchStrategy,
}

impl CompressionConfig {
    /// Reject configurations that cannot drive the encoder
    pub fn validate(&self) -> Result<()> {
        if self.base_window_size == 0 {
            return Err(Error::InvalidConfig("base window size must be positive".to_string()));
        }
        if self.max_window_size == 0 {
            return Err(Error::InvalidConfig("max window size must be positive".to_string()));
        }
        if self.base_window_size > self.max_window_size {
            return Err(Error::InvalidConfig(format!(
                "base window size {} exceeds max window size {}",
                self.base_window_size, self.max_window_size
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk size must be positive".to_string()));
        }
        if self.lookahead_size == 0 || self.lookahead_size > MAX_MATCH_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "lookahead size {} outside 1..={}",
                self.lookahead_size, MAX_MATCH_LENGTH
            )));
        }
        Ok(())
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            base_window_size: DEFAULT_BASE_WINDOW_SIZE,
            max_window_size: DEFAULT_MAX_WINDOW_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            lookahead_size: MAX_MATCH_LENGTH,
            num_threads: 1,
            match_strategy: MatchStrategy::ByteIndex,
        }
    }
}

/// What happened to a single chunk
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkSummary {
    /// Position of the chunk in the input
    pub index: usize,
    /// Uncompressed bytes in the chunk
    pub len: usize,
    /// Repetitiveness estimate for the chunk
    pub ratio: f64,
    /// Search window selected for the chunk
    pub window_size: usize,
    /// Tokens emitted for the chunk
    pub tokens: usize,
}

/// Statistics from a compression operation
#[derive(Clone, Debug, Default)]
pub struct CompressionStats {
    pub input_bytes: u64,
    pub chunks: u64,
    pub tokens: u64,
    pub literals: u64,
    pub matches: u64,
    /// Bytes covered by back-references (excluding trailing literals)
    pub matched_bytes: u64,
    /// Chunks that were compressed with a window larger than the base
    pub expanded_windows: u64,
    pub chunk_summaries: Vec<ChunkSummary>,
}

impl CompressionStats {
    /// Fold one chunk's tokens and summary into the totals
    pub fn record_chunk(&mut self, tokens: &[Token], summary: ChunkSummary, base_window: usize) {
        self.input_bytes += summary.len as u64;
        self.chunks += 1;
        self.tokens += tokens.len() as u64;
        for token in tokens {
            match token {
                Token::Literal(_) => self.literals += 1,
                Token::Match { length, .. } => {
                    self.matches += 1;
                    self.matched_bytes += *length as u64;
                }
            }
        }
        if summary.window_size > base_window {
            self.expanded_windows += 1;
        }
        self.chunk_summaries.push(summary);
    }
}
