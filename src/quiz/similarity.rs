// ============================================================
// Character Similarity Ratio
// ============================================================
// A normalised measure of how much two strings share, in [0, 1]:
//
//     ratio = 2 * matched_chars / (len(a) + len(b))
//
// Matched characters come from longest-matching-block search
// (Ratcliff/Obershelp): find the longest common run, then repeat
// on the pieces left and right of it. Only contiguous runs count,
// so unrelated English text scores low even though it shares
// most of its letters.
//
// When `b` is 200 characters or longer, characters that make up
// more than 1% of it (spaces, 'e', 't', ...) cannot start a match;
// they are only picked up when extending a run found elsewhere.
//
// Lengths and positions are in chars. Two empty strings are a
// perfect match (1.0).

use std::collections::HashMap;

/// `b` must be at least this long before popular characters are ignored
pub const AUTOJUNK_MIN_LEN: usize = 200;

pub fn char_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_chars();
    2.0 * matched as f64 / total as f64
}

struct BlockMatcher<'s> {
    a:   &'s [char],
    b:   &'s [char],
    /// Positions of each usable character in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> BlockMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks.
    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        matched
    }

    /// Longest run `a[i..i+k] == b[j..j+k]` inside the given ranges.
    /// Ties go to the earliest run in `a`, then the earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // run length ending at each b position, for the previous a position
        let mut runs: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| runs.get(&prev))
                        .map_or(1, |len| len + 1);
                    next.insert(j, k);
                    if k > best_len {
                        best_i   = i + 1 - k;
                        best_j   = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            runs = next;
        }

        // Popular characters never start a run but may extend one
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i   -= 1;
            best_j   -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        (best_i, best_j, best_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-12
    }

    #[test]
    fn test_identical_strings() {
        assert_eq!(char_ratio("wolf", "wolf"), 1.0);
        assert_eq!(char_ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_eq!(char_ratio("abc", "xyz"), 0.0);
        assert_eq!(char_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // "colo" + "r": 2*5 / 11
        assert!(close(char_ratio("colour", "color"), 10.0 / 11.0));
    }

    #[test]
    fn test_exact_fractions_stay_exact() {
        assert_eq!(char_ratio("ab", "abcdefgh"), 0.4);
        assert_eq!(char_ratio("the wolf ate grandma", "the wolf swallowed grandmother"), 0.72);
    }

    #[test]
    fn test_only_contiguous_runs_count() {
        // A common subsequence would give 2*4/8; blocks give "bcd" only
        assert_eq!(char_ratio("abcd", "bcda"), 0.75);
        assert!(close(char_ratio("the little red hen", "a little red fox"), 24.0 / 34.0));
    }

    #[test]
    fn test_popular_characters_are_ignored_in_long_text() {
        // every char of a 200-char `b` is popular, so nothing can start a match
        assert_eq!(char_ratio("xe e e", &"e ".repeat(100)), 0.0);
        // one char shorter and "e e e" matches: 2*5 / (6 + 198)
        assert!(close(char_ratio("xe e e", &"e ".repeat(99)), 10.0 / 204.0));
    }
}
