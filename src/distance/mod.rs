//! Weighted edit-distance scoring for fuzzy dictionary lookups.
//!
//! The distance function used here is *not* the canonical Levenshtein
//! metric: the cost model is asymmetric, biased against deleting
//! characters from the query. A typist is far more likely to have missed
//! a key (fixed by inserting a character) or hit a neighboring one
//! (fixed by substitution) than to have typed extra characters, so:
//!
//! - substitution costs **1**
//! - insertion (adding a character to `source` to reach `target`) costs **1**
//! - deletion (removing a character from `source`) costs **2**
//!
//! A deletion-heavy transformation can therefore score above the classic
//! Levenshtein distance between the same pair.
//!
//! [`bounded_distance`] adds an early abort: when the character-length gap
//! between the two strings already exceeds the bound, it returns
//! `max_distance + 1` without running the DP. Any value above the bound is
//! a sentinel meaning "no match within the bound", never a literal
//! distance.

use smallvec::SmallVec;

/// Cost of replacing one character with another.
const SUBSTITUTION_COST: usize = 1;
/// Cost of adding a character to the source string.
const INSERTION_COST: usize = 1;
/// Cost of removing a character from the source string.
const DELETION_COST: usize = 2;

/// Compute the weighted edit distance between two strings, aborting early
/// when the result cannot fall within `max_distance`.
///
/// Returns `max_distance + 1` when the character-length gap between
/// `source` and `target` already exceeds the bound. Callers must treat any
/// return value greater than `max_distance` as "no match" — it is a
/// sentinel, not a distance.
///
/// # Example
///
/// ```rust
/// use libtypeahead::distance::bounded_distance;
///
/// assert_eq!(bounded_distance("cat", "cats", 3), 1); // one insertion
/// assert_eq!(bounded_distance("cat", "ca", 3), 2);   // one deletion, cost 2
/// assert_eq!(bounded_distance("book", "backpack", 2), 3); // gap 4 > 2: sentinel
/// ```
pub fn bounded_distance(source: &str, target: &str, max_distance: usize) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let gap = source_chars.len().abs_diff(target_chars.len());
    if gap > max_distance {
        return max_distance + 1;
    }

    weighted_distance_impl(&source_chars, &target_chars)
}

/// Compute the weighted edit distance between two strings without a bound.
///
/// Same cost model as [`bounded_distance`] (substitution 1, insertion 1,
/// deletion 2), useful for direct measurement and for cross-validating the
/// bounded variant.
///
/// # Example
///
/// ```rust
/// use libtypeahead::distance::weighted_distance;
///
/// assert_eq!(weighted_distance("kitten", "sitting"), 3); // 2 subs + 1 insertion
/// assert_eq!(weighted_distance("cats", "cat"), 2);       // 1 deletion
/// assert_eq!(weighted_distance("test", "test"), 0);
/// ```
pub fn weighted_distance(source: &str, target: &str) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    weighted_distance_impl(&source_chars, &target_chars)
}

/// Space-optimized DP over two rolling rows of length `target.len() + 1`.
fn weighted_distance_impl(source_chars: &[char], target_chars: &[char]) -> usize {
    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n * INSERTION_COST;
    }
    if n == 0 {
        return m * DELETION_COST;
    }

    let mut prev_row = vec![0; n + 1];
    let mut curr_row = vec![0; n + 1];

    // Transforming an empty source prefix into target[..j] takes j insertions.
    for (j, item) in prev_row.iter_mut().enumerate().take(n + 1) {
        *item = j * INSERTION_COST;
    }

    for i in 1..=m {
        // Transforming source[..i] into an empty target takes i deletions.
        curr_row[0] = i * DELETION_COST;

        for j in 1..=n {
            let cost = if source_chars[i - 1] == target_chars[j - 1] {
                0
            } else {
                SUBSTITUTION_COST
            };

            curr_row[j] = (prev_row[j] + DELETION_COST)
                .min(curr_row[j - 1] + INSERTION_COST)
                .min(prev_row[j - 1] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}
