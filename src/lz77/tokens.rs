/// Maximum match length, which is also the lookahead buffer capacity
pub const MAX_MATCH_LENGTH: usize = 258;

/// Represents a single token in the LZ77 stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// A literal byte
    Literal(u8),
    /// A back-reference: copy `length` bytes from `distance` bytes back, then
    /// emit `next` if the match stopped short of the end of input
    Match { distance: usize, length: u16, next: Option<u8> },
}

impl Token {
    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, next, .. } => *length as usize + usize::from(next.is_some()),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }
}

/// Total uncompressed size of a token stream
pub fn uncompressed_len(tokens: &[Token]) -> usize {
    tokens.iter().map(Token::uncompressed_size).sum()
}
