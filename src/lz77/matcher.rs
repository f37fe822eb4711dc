use super::index::ByteIndexFinder;
use crate::MatchStrategy;
use tracing::trace;

/// Longest back-reference found for the current lookahead
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongestMatch {
    /// Bytes back from the cursor where the match starts (>= 1)
    pub distance: usize,
    /// Number of matching bytes (>= 1)
    pub length: usize,
}

/// Find the longest prefix of `lookahead` that occurs in `window`.
///
/// Offsets are scanned oldest first and only a strictly longer match replaces
/// the current best, so among equal-length matches the oldest occurrence
/// (largest distance) wins. A match never extends past the end of `window`.
///
/// Returns `None` when no offset yields a positive-length match.
pub fn find_longest_match(window: &[u8], lookahead: &[u8]) -> Option<LongestMatch> {
    let mut best: Option<LongestMatch> = None;
    let mut best_length = 0;

    for j in 0..window.len() {
        let length = common_prefix_len(&window[j..], lookahead);
        if length > best_length {
            best_length = length;
            best = Some(LongestMatch { distance: window.len() - j, length });

            // Nothing later can strictly improve on a full lookahead match
            if best_length == lookahead.len() {
                break;
            }
        }
    }

    best
}

/// Length of the common prefix, capped by the shorter slice
#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Strategy for locating back-references within one input buffer.
///
/// Implementations must return exactly what [`find_longest_match`] returns for
/// `window = input[cursor - window_size..cursor]` (clamped at 0) and
/// `lookahead = input[cursor..cursor + lookahead_size]` (clamped at the end).
pub trait MatchFinder {
    /// Find the longest match for the lookahead starting at `cursor`.
    fn find(&self, cursor: usize, window_size: usize) -> Option<LongestMatch>;
}

/// Reference finder: scans every window offset.
pub struct BruteForceFinder<'a> {
    input: &'a [u8],
    lookahead_size: usize,
}

impl<'a> BruteForceFinder<'a> {
    pub fn new(input: &'a [u8], lookahead_size: usize) -> Self {
        Self { input, lookahead_size }
    }
}

impl MatchFinder for BruteForceFinder<'_> {
    fn find(&self, cursor: usize, window_size: usize) -> Option<LongestMatch> {
        let window_start = cursor.saturating_sub(window_size);
        let lookahead_end = (cursor + self.lookahead_size).min(self.input.len());
        find_longest_match(&self.input[window_start..cursor], &self.input[cursor..lookahead_end])
    }
}

/// Build the finder for `strategy` over `input`
pub fn build_finder<'a>(
    strategy: MatchStrategy,
    input: &'a [u8],
    lookahead_size: usize,
) -> Box<dyn MatchFinder + 'a> {
    trace!(?strategy, len = input.len(), "building match finder");
    match strategy {
        MatchStrategy::BruteForce => Box::new(BruteForceFinder::new(input, lookahead_size)),
        MatchStrategy::ByteIndex => Box::new(ByteIndexFinder::new(input, lookahead_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lz77::MAX_MATCH_LENGTH;

    #[test]
    fn test_empty_window() {
        assert_eq!(find_longest_match(b"", b"abc"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_longest_match(b"xyz", b"abc"), None);
    }

    #[test]
    fn test_simple_match() {
        let m = find_longest_match(b"abcd", b"abce").unwrap();
        assert_eq!(m, LongestMatch { distance: 4, length: 3 });
    }

    #[test]
    fn test_tie_prefers_oldest() {
        // "ab" occurs at offsets 0 and 3; the oldest (distance 6) must win
        let m = find_longest_match(b"abxabx", b"abz").unwrap();
        assert_eq!(m, LongestMatch { distance: 6, length: 2 });
    }

    #[test]
    fn test_longer_match_beats_older() {
        let m = find_longest_match(b"abxabc", b"abcq").unwrap();
        assert_eq!(m, LongestMatch { distance: 3, length: 3 });
    }

    #[test]
    fn test_match_capped_at_window_end() {
        // Window "aa" against lookahead "aaaa": offset 0 can only match 2 bytes
        let m = find_longest_match(b"aa", b"aaaa").unwrap();
        assert_eq!(m, LongestMatch { distance: 2, length: 2 });
    }

    #[test]
    fn test_match_capped_at_lookahead() {
        let m = find_longest_match(b"abcdef", b"abc").unwrap();
        assert_eq!(m, LongestMatch { distance: 6, length: 3 });
    }

    #[test]
    fn test_brute_force_finder_clamps_window() {
        let input = b"abcabcabc";
        let finder = BruteForceFinder::new(input, MAX_MATCH_LENGTH);

        // Window of 3 at cursor 6 is "abc"
        let m = finder.find(6, 3).unwrap();
        assert_eq!(m, LongestMatch { distance: 3, length: 3 });

        // Unlimited window at cursor 6 prefers the oldest "abc"
        let m = finder.find(6, 1 << 20).unwrap();
        assert_eq!(m, LongestMatch { distance: 6, length: 3 });

        assert_eq!(finder.find(0, 16), None);
    }

    #[test]
    fn test_brute_force_finder_respects_lookahead_size() {
        let input = vec![b'z'; 64];
        let finder = BruteForceFinder::new(&input, 4);
        let m = finder.find(32, 32).unwrap();
        assert_eq!(m, LongestMatch { distance: 32, length: 4 });
    }
}
