pub mod index;
pub mod matcher;
pub mod tokens;

pub use index::ByteIndexFinder;
pub use matcher::{build_finder, find_longest_match, BruteForceFinder, LongestMatch, MatchFinder};
pub use tokens::{uncompressed_len, Token, MAX_MATCH_LENGTH};
