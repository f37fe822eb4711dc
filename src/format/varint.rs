//! Unsigned LEB128 integers: 7 bits per byte, low group first, high bit set
//! on every byte except the last.

use super::constants::MAX_VARINT_LEN;
use crate::error::{Error, Result};
use std::io::{Read, Write};

/// Append the encoding of `value` to `out`, returning the bytes written
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out.len() - start
}

/// Write `value` to `writer`, returning the bytes written
pub fn write_varint<W: Write>(writer: &mut W, value: u64) -> Result<usize> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    let len = encode_varint(value, &mut buf);
    writer.write_all(&buf)?;
    Ok(len)
}

/// Read one varint from `reader`
pub fn read_varint<R: Read>(reader: &mut R) -> Result<u64> {
    let mut value = 0u64;

    for i in 0..MAX_VARINT_LEN {
        let byte = read_u8(reader)?;
        let group = (byte & 0x7F) as u64;

        // The tenth byte may only contribute the single top bit
        if i == MAX_VARINT_LEN - 1 && (group > 1 || byte & 0x80 != 0) {
            return Err(Error::VarintOverflow);
        }

        value |= group << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }

    Err(Error::VarintOverflow)
}

/// Read a single byte, reporting a short read as `UnexpectedEof`
pub(crate) fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(reader, &mut buf)?;
    Ok(buf[0])
}

/// `read_exact` with short reads reported as `UnexpectedEof`
pub(crate) fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedEof),
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        let mut out = Vec::new();
        assert_eq!(encode_varint(0, &mut out), 1);
        assert_eq!(out, [0x00]);

        out.clear();
        encode_varint(127, &mut out);
        assert_eq!(out, [0x7F]);

        out.clear();
        encode_varint(128, &mut out);
        assert_eq!(out, [0x80, 0x01]);

        out.clear();
        encode_varint(300, &mut out);
        assert_eq!(out, [0xAC, 0x02]);

        out.clear();
        assert_eq!(encode_varint(u64::MAX, &mut out), MAX_VARINT_LEN);
        assert_eq!(out[9], 0x01);
    }

    #[test]
    fn test_read_extremes() {
        let mut out = Vec::new();
        encode_varint(u64::MAX, &mut out);
        encode_varint(32768, &mut out);

        let mut reader = out.as_slice();
        assert_eq!(read_varint(&mut reader).unwrap(), u64::MAX);
        assert_eq!(read_varint(&mut reader).unwrap(), 32768);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_overflow() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        assert!(matches!(read_varint(&mut bytes.as_slice()), Err(Error::VarintOverflow)));

        let too_long = [0x80; 11];
        assert!(matches!(read_varint(&mut too_long.as_slice()), Err(Error::VarintOverflow)));
    }

    #[test]
    fn test_truncated() {
        let bytes = [0x80, 0x80];
        assert!(matches!(read_varint(&mut bytes.as_slice()), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_write_varint() {
        let mut out = Vec::new();
        assert_eq!(write_varint(&mut out, 300).unwrap(), 2);
        assert_eq!(out, [0xAC, 0x02]);
    }
}
