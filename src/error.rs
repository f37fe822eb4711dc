use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Input / configuration errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Token stream errors
    #[error("Back-reference distance {distance} exceeds available output {available}")]
    OutOfRangeReference { distance: usize, available: usize },

    #[error("Match length {0} exceeds maximum 258")]
    InvalidMatchLength(u64),

    #[error("Invalid token tag: 0x{0:02x}")]
    InvalidTokenTag(u8),

    #[error("Varint exceeds 64 bits")]
    VarintOverflow,

    // Frame errors
    #[error("Invalid frame magic: expected \"ALZ1\", got {0:02x?}")]
    InvalidMagic([u8; 4]),

    #[error("Unsupported frame version: {0}")]
    UnsupportedVersion(u8),

    #[error("Unsupported frame flags: 0x{0:02x}")]
    UnsupportedFlags(u8),

    // Checksum errors
    #[error("CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    Crc32Mismatch { expected: u32, found: u32 },

    #[error("Size mismatch: expected {expected} bytes, got {found}")]
    SizeMismatch { expected: u64, found: u64 },

    // Internal errors
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
