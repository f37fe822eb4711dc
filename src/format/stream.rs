use super::constants::{TAG_LITERAL, TAG_MATCH, TAG_MATCH_END};
use super::varint::{encode_varint, read_u8, read_varint};
use crate::error::{Error, Result};
use crate::lz77::{Token, MAX_MATCH_LENGTH};
use std::io::{Read, Write};

/// Serializes tokens as tag byte + varint fields
pub struct TokenWriter<W: Write> {
    writer: W,
    /// Scratch buffer reused across tokens
    scratch: Vec<u8>,
    bytes_written: u64,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, scratch: Vec::with_capacity(32), bytes_written: 0 }
    }

    /// Write a single token
    pub fn write_token(&mut self, token: &Token) -> Result<()> {
        self.scratch.clear();
        encode_token(token, &mut self.scratch);
        self.writer.write_all(&self.scratch)?;
        self.bytes_written += self.scratch.len() as u64;
        Ok(())
    }

    /// Write every token in order
    pub fn write_tokens(&mut self, tokens: &[Token]) -> Result<()> {
        for token in tokens {
            self.write_token(token)?;
        }
        Ok(())
    }

    /// Total encoded bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Append the encoding of `token` to `out`
pub fn encode_token(token: &Token, out: &mut Vec<u8>) {
    match *token {
        Token::Literal(byte) => {
            out.push(TAG_LITERAL);
            out.push(byte);
        }
        Token::Match { distance, length, next } => {
            out.push(if next.is_some() { TAG_MATCH } else { TAG_MATCH_END });
            encode_varint(distance as u64, out);
            encode_varint(length as u64, out);
            if let Some(byte) = next {
                out.push(byte);
            }
        }
    }
}

/// Deserializes tokens written by [`TokenWriter`]
pub struct TokenReader<R: Read> {
    reader: R,
}

impl<R: Read> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the next token.
    ///
    /// Distances are not checked here; the decoder rejects references that
    /// reach before the start of its output.
    pub fn read_token(&mut self) -> Result<Token> {
        let tag = read_u8(&mut self.reader)?;
        match tag {
            TAG_LITERAL => Ok(Token::Literal(read_u8(&mut self.reader)?)),
            TAG_MATCH | TAG_MATCH_END => {
                let distance = read_varint(&mut self.reader)?;
                let distance = usize::try_from(distance).map_err(|_| Error::VarintOverflow)?;

                let length = read_varint(&mut self.reader)?;
                if length > MAX_MATCH_LENGTH as u64 {
                    return Err(Error::InvalidMatchLength(length));
                }

                let next = if tag == TAG_MATCH { Some(read_u8(&mut self.reader)?) } else { None };
                Ok(Token::Match { distance, length: length as u16, next })
            }
            _ => Err(Error::InvalidTokenTag(tag)),
        }
    }

    /// Read exactly `count` tokens
    pub fn read_tokens(&mut self, count: usize) -> Result<Vec<Token>> {
        // Cap the up-front allocation; `count` comes from untrusted input
        let mut tokens = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            tokens.push(self.read_token()?);
        }
        Ok(tokens)
    }
}
