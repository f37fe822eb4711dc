//! Byte-indexed match finder.
//!
//! Every position of the input is bucketed by its byte value. A lookup only
//! visits window positions whose first byte equals the first lookahead byte,
//! in ascending order. Positions with a different first byte would produce a
//! zero-length match, which never replaces the current best, so the result is
//! identical to the brute-force scan including its tie-break.

use super::matcher::{common_prefix_len, LongestMatch, MatchFinder};

pub struct ByteIndexFinder<'a> {
    input: &'a [u8],
    lookahead_size: usize,
    /// Ascending positions of each byte value
    positions: Vec<Vec<usize>>,
}

impl<'a> ByteIndexFinder<'a> {
    pub fn new(input: &'a [u8], lookahead_size: usize) -> Self {
        let mut positions = vec![Vec::new(); 256];
        for (pos, &byte) in input.iter().enumerate() {
            positions[byte as usize].push(pos);
        }
        Self { input, lookahead_size, positions }
    }
}

impl MatchFinder for ByteIndexFinder<'_> {
    fn find(&self, cursor: usize, window_size: usize) -> Option<LongestMatch> {
        let lookahead_end = (cursor + self.lookahead_size).min(self.input.len());
        let lookahead = &self.input[cursor..lookahead_end];
        let first = *lookahead.first()?;

        let window_start = cursor.saturating_sub(window_size);
        let bucket = &self.positions[first as usize];
        let lo = bucket.partition_point(|&p| p < window_start);
        let hi = bucket.partition_point(|&p| p < cursor);

        let mut best: Option<LongestMatch> = None;
        let mut best_length = 0;

        for &pos in &bucket[lo..hi] {
            let length = common_prefix_len(&self.input[pos..cursor], lookahead);
            if length > best_length {
                best_length = length;
                best = Some(LongestMatch { distance: cursor - pos, length });

                if best_length == lookahead.len() {
                    break;
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lz77::matcher::BruteForceFinder;
    use crate::lz77::MAX_MATCH_LENGTH;

    fn assert_same_as_brute_force(input: &[u8], window_size: usize, lookahead_size: usize) {
        let brute = BruteForceFinder::new(input, lookahead_size);
        let indexed = ByteIndexFinder::new(input, lookahead_size);
        for cursor in 0..input.len() {
            assert_eq!(
                indexed.find(cursor, window_size),
                brute.find(cursor, window_size),
                "cursor {} window {}",
                cursor,
                window_size
            );
        }
    }

    #[test]
    fn test_matches_brute_force_text() {
        let input = b"abracadabra abracadabra, said the magician to the abracadabra";
        for window_size in [1, 2, 5, 16, 1024] {
            assert_same_as_brute_force(input, window_size, MAX_MATCH_LENGTH);
        }
    }

    #[test]
    fn test_matches_brute_force_runs() {
        let mut input = vec![b'A'; 300];
        input.extend_from_slice(b"BBBBABABABAB");
        input.extend(std::iter::repeat(b'A').take(40));
        for window_size in [3, 64, 512] {
            assert_same_as_brute_force(&input, window_size, MAX_MATCH_LENGTH);
            assert_same_as_brute_force(&input, window_size, 7);
        }
    }

    #[test]
    fn test_matches_brute_force_binary() {
        let mut state = 0x2545_f491_4f6c_dd1du64;
        let input: Vec<u8> = (0..2000)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                // Small alphabet so matches actually occur
                (state % 5) as u8
            })
            .collect();
        assert_same_as_brute_force(&input, 100, MAX_MATCH_LENGTH);
    }

    #[test]
    fn test_window_start_excludes_older_positions() {
        let finder = ByteIndexFinder::new(b"xyzab____xyz", MAX_MATCH_LENGTH);
        // "xyz" at 0 is 9 back, outside a window of 8
        assert_eq!(finder.find(9, 8), None);
        assert_eq!(finder.find(9, 9), Some(LongestMatch { distance: 9, length: 3 }));
    }
}
