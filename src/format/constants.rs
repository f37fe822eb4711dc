/// Frame magic bytes
pub const FRAME_MAGIC: [u8; 4] = *b"ALZ1";

/// Current frame version
pub const FRAME_VERSION: u8 = 1;

/// Magic + version + flags
pub const FRAME_PREFIX_SIZE: usize = 6;

/// Frame footer size (CRC32)
pub const FRAME_FOOTER_SIZE: usize = 4;

/// Longest LEB128 encoding of a u64
pub const MAX_VARINT_LEN: usize = 10;

/// Token tag: `[tag, byte]`
pub const TAG_LITERAL: u8 = 0x00;

/// Token tag: `[tag, distance, length, next]`
pub const TAG_MATCH: u8 = 0x01;

/// Token tag: `[tag, distance, length]`, match without a trailing literal
pub const TAG_MATCH_END: u8 = 0x02;
