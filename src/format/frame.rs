//! Self-describing container for a token stream.
//!
//! Layout:
//! - Magic: "ALZ1" (4 bytes)
//! - Version: u8
//! - Flags: u8 (reserved, must be 0)
//! - Original size: varint
//! - Token count: varint
//! - Tokens (see `stream`)
//! - CRC32 of the original bytes: u32 (little-endian)

use super::constants::*;
use super::stream::{TokenReader, TokenWriter};
use super::varint::{read_exact, read_u8, read_varint, write_varint};
use crate::decoder::Decoder;
use crate::error::{Error, Result};
use crate::lz77::{uncompressed_len, Token};
use std::io::{Read, Write};
use tracing::debug;

/// Frame header fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u8,
    pub flags: u8,
    /// Uncompressed size of the framed data
    pub original_size: u64,
    pub token_count: u64,
}

impl FrameHeader {
    /// Read and validate a header
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_exact(reader, &mut magic)?;
        if magic != FRAME_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let version = read_u8(reader)?;
        if version != FRAME_VERSION {
            return Err(Error::UnsupportedVersion(version));
        }

        let flags = read_u8(reader)?;
        if flags != 0 {
            return Err(Error::UnsupportedFlags(flags));
        }
        let original_size = read_varint(reader)?;
        let token_count = read_varint(reader)?;

        debug!(original_size, token_count, "read frame header");
        Ok(Self { version, flags, original_size, token_count })
    }

    /// Write the header, returning the bytes written
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<usize> {
        writer.write_all(&FRAME_MAGIC)?;
        writer.write_all(&[self.version, self.flags])?;
        let mut written = FRAME_PREFIX_SIZE;
        written += write_varint(writer, self.original_size)?;
        written += write_varint(writer, self.token_count)?;
        Ok(written)
    }
}

/// A fully parsed frame
#[derive(Clone, Debug)]
pub struct Frame {
    pub header: FrameHeader,
    pub tokens: Vec<Token>,
    pub crc32: u32,
}

impl Frame {
    /// Decode the tokens and verify size and checksum
    pub fn decode(&self) -> Result<Vec<u8>> {
        let mut decoder = Decoder::with_capacity(uncompressed_len(&self.tokens));
        for token in &self.tokens {
            decoder.push(token)?;
        }
        let data = decoder.finish();
        verify(&self.header, &data, self.crc32)?;
        Ok(data)
    }
}

/// Writes token streams as frames
pub struct FrameWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, bytes_written: 0 }
    }

    /// Write one frame for `tokens`, which must decode to `original`.
    ///
    /// Returns the frame size in bytes. Nothing is written when the token
    /// lengths do not add up to `original.len()`.
    pub fn write_frame(&mut self, tokens: &[Token], original: &[u8]) -> Result<u64> {
        let token_len = uncompressed_len(tokens);
        if token_len != original.len() {
            return Err(Error::InvalidInput(format!(
                "tokens decode to {} bytes but original is {} bytes",
                token_len,
                original.len()
            )));
        }

        let header = FrameHeader {
            version: FRAME_VERSION,
            flags: 0,
            original_size: original.len() as u64,
            token_count: tokens.len() as u64,
        };
        let header_size = header.write(&mut self.writer)?;

        let mut token_writer = TokenWriter::new(&mut self.writer);
        token_writer.write_tokens(tokens)?;
        let token_bytes = token_writer.bytes_written();

        // Footer: CRC32 of the uncompressed data
        let crc = crc32fast::hash(original);
        self.writer.write_all(&crc.to_le_bytes())?;

        let frame_size = header_size as u64 + token_bytes + FRAME_FOOTER_SIZE as u64;
        self.bytes_written += frame_size;
        Ok(frame_size)
    }

    /// Total bytes written across all frames
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and finish writing
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Parse a whole frame without decoding it
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Frame> {
    let header = FrameHeader::read(reader)?;
    let count = usize::try_from(header.token_count).map_err(|_| Error::VarintOverflow)?;

    let mut token_reader = TokenReader::new(&mut *reader);
    let tokens = token_reader.read_tokens(count)?;

    let crc32 = read_crc(reader)?;
    Ok(Frame { header, tokens, crc32 })
}

/// Read one frame and return the verified original bytes.
///
/// Tokens are replayed as they are read, so the token stream is never held
/// in memory as a whole.
pub fn decompress_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let header = FrameHeader::read(reader)?;

    let capacity = usize::try_from(header.original_size).unwrap_or(usize::MAX);
    let mut decoder = Decoder::with_capacity(capacity);

    let mut token_reader = TokenReader::new(&mut *reader);
    for _ in 0..header.token_count {
        let token = token_reader.read_token()?;
        decoder.push(&token)?;
        if decoder.len() as u64 > header.original_size {
            return Err(Error::SizeMismatch {
                expected: header.original_size,
                found: decoder.len() as u64,
            });
        }
    }

    let crc32 = read_crc(reader)?;
    let data = decoder.finish();
    verify(&header, &data, crc32)?;
    Ok(data)
}

/// Quick check - only validates the magic and version.
pub fn is_frame<R: Read>(reader: &mut R) -> Result<bool> {
    let mut prefix = [0u8; 5];
    match read_exact(reader, &mut prefix) {
        Ok(()) => {}
        Err(Error::UnexpectedEof) => return Ok(false),
        Err(e) => return Err(e),
    }
    Ok(prefix[..4] == FRAME_MAGIC && prefix[4] == FRAME_VERSION)
}

fn read_crc<R: Read>(reader: &mut R) -> Result<u32> {
    let mut footer = [0u8; FRAME_FOOTER_SIZE];
    read_exact(reader, &mut footer)?;
    Ok(u32::from_le_bytes(footer))
}

fn verify(header: &FrameHeader, data: &[u8], expected_crc: u32) -> Result<()> {
    if data.len() as u64 != header.original_size {
        return Err(Error::SizeMismatch {
            expected: header.original_size,
            found: data.len() as u64,
        });
    }

    let found = crc32fast::hash(data);
    if found != expected_crc {
        return Err(Error::Crc32Mismatch { expected: expected_crc, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Token>, Vec<u8>) {
        let tokens = vec![
            Token::Literal(b'a'),
            Token::Literal(b'b'),
            Token::Match { distance: 2, length: 4, next: Some(b'c') },
        ];
        (tokens, b"abababc".to_vec())
    }

    fn framed(tokens: &[Token], original: &[u8]) -> Vec<u8> {
        let mut writer = FrameWriter::new(Vec::new());
        let size = writer.write_frame(tokens, original).unwrap();
        assert_eq!(writer.bytes_written(), size);
        let out = writer.finish().unwrap();
        assert_eq!(out.len() as u64, size);
        out
    }

    #[test]
    fn test_frame_layout() {
        let (tokens, original) = sample();
        let out = framed(&tokens, &original);

        assert_eq!(&out[..4], b"ALZ1");
        assert_eq!(out[4], FRAME_VERSION);
        assert_eq!(out[5], 0);
        assert_eq!(out[6], 7); // original size
        assert_eq!(out[7], 3); // token count

        let crc = u32::from_le_bytes(out[out.len() - 4..].try_into().unwrap());
        assert_eq!(crc, crc32fast::hash(&original));
    }

    #[test]
    fn test_read_frame() {
        let (tokens, original) = sample();
        let out = framed(&tokens, &original);

        let frame = read_frame(&mut out.as_slice()).unwrap();
        assert_eq!(frame.header.original_size, 7);
        assert_eq!(frame.header.token_count, 3);
        assert_eq!(frame.tokens, tokens);
        assert_eq!(frame.decode().unwrap(), original);
    }

    #[test]
    fn test_decompress_frame() {
        let (tokens, original) = sample();
        let out = framed(&tokens, &original);
        assert_eq!(decompress_frame(&mut out.as_slice()).unwrap(), original);
    }

    #[test]
    fn test_empty_frame() {
        let out = framed(&[], b"");
        assert_eq!(decompress_frame(&mut out.as_slice()).unwrap(), b"");
    }

    #[test]
    fn test_crc_mismatch() {
        let (tokens, original) = sample();
        let mut out = framed(&tokens, &original);
        let last = out.len() - 1;
        out[last] ^= 0xFF;

        assert!(matches!(
            decompress_frame(&mut out.as_slice()),
            Err(Error::Crc32Mismatch { .. })
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let (tokens, original) = sample();
        let mut out = framed(&tokens, &original);
        out[6] = 6; // claim one byte fewer

        assert!(matches!(
            decompress_frame(&mut out.as_slice()),
            Err(Error::SizeMismatch { expected: 6, found: 7 })
        ));
    }

    #[test]
    fn test_bad_magic_and_version() {
        let (tokens, original) = sample();
        let mut out = framed(&tokens, &original);

        let mut bad_version = out.clone();
        bad_version[4] = 9;
        assert!(matches!(
            decompress_frame(&mut bad_version.as_slice()),
            Err(Error::UnsupportedVersion(9))
        ));

        out[0] = b'X';
        assert!(matches!(decompress_frame(&mut out.as_slice()), Err(Error::InvalidMagic(_))));
    }

    #[test]
    fn test_nonzero_flags_rejected() {
        let (tokens, original) = sample();
        let mut out = framed(&tokens, &original);
        out[5] = 0x01;

        assert!(matches!(decompress_frame(&mut out.as_slice()), Err(Error::UnsupportedFlags(0x01))));
        assert!(matches!(read_frame(&mut out.as_slice()), Err(Error::UnsupportedFlags(0x01))));
    }

    #[test]
    fn test_write_frame_rejects_mismatched_original() {
        let (tokens, _) = sample();
        let mut writer = FrameWriter::new(Vec::new());

        let result = writer.write_frame(&tokens, b"abababcX");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(writer.bytes_written(), 0);
        assert!(writer.finish().unwrap().is_empty());
    }

    #[test]
    fn test_decode_with_inflated_lengths() {
        // Lengths pass the reader's limit but the first reference has no source
        let mut raw = Vec::new();
        let header = FrameHeader { version: FRAME_VERSION, flags: 0, original_size: 1, token_count: 50_000 };
        header.write(&mut raw).unwrap();
        {
            let mut writer = TokenWriter::new(&mut raw);
            for _ in 0..50_000 {
                writer.write_token(&Token::Match { distance: 1, length: 258, next: None }).unwrap();
            }
        }
        raw.extend_from_slice(&[0; FRAME_FOOTER_SIZE]);

        let frame = read_frame(&mut raw.as_slice()).unwrap();
        assert!(matches!(frame.decode(), Err(Error::OutOfRangeReference { distance: 1, available: 0 })));
    }

    #[test]
    fn test_truncated_frame() {
        let (tokens, original) = sample();
        let out = framed(&tokens, &original);
        let truncated = &out[..out.len() - 2];
        assert!(matches!(decompress_frame(&mut &truncated[..]), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_is_frame() {
        let (tokens, original) = sample();
        let out = framed(&tokens, &original);
        assert!(is_frame(&mut out.as_slice()).unwrap());
        assert!(!is_frame(&mut &b"\x1f\x8b\x08\x04\x00"[..]).unwrap());
        assert!(!is_frame(&mut &b"AL"[..]).unwrap());
    }
}
