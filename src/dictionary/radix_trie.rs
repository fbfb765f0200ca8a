//! Compressed prefix tree (radix trie) over a lowercased vocabulary.
//!
//! The trie is built once from a corpus, compressed, and read-only
//! afterwards. Nodes live in an arena (`Vec` indexed by `usize`) with the
//! root at index 0; every root-to-marked-node path spells exactly one
//! inserted word. Edges are kept in the order they were first created,
//! which makes traversal order — and therefore which of several equally
//! short completions wins — a deterministic contract rather than an
//! accident of hashing.
//!
//! Each word carries a monotonically increasing insertion index. The index
//! is a commonality proxy: corpora are fed most-common-first, so fuzzy
//! ranking can bias toward earlier-inserted words.
//!
//! # Examples
//!
//! ```
//! use libtypeahead::dictionary::RadixTrie;
//!
//! let trie = RadixTrie::from_terms(["car", "cat", "pot"]);
//!
//! assert!(trie.contains("cat"));
//! assert!(!trie.contains("ca")); // prefix, not a word
//! assert_eq!(trie.completions("ca", 2), vec!["car", "cat"]);
//!
//! let matches = trie.closest("cst", 2);
//! assert_eq!(matches[0].word, "cat"); // one substitution away
//! ```

use std::cmp::Ordering;

use crate::distance::bounded_distance;

/// Insertion indices up to this value are treated as "common" words and
/// carry no rarity penalty during fuzzy ranking.
const COMMON_INDEX_CUTOFF: usize = 5000;

/// Adjusted-distance penalty per index position past the cutoff.
const RARITY_PENALTY_STEP: f64 = 0.01;

/// A node in the trie arena.
///
/// `edges` maps edge labels (single characters before compression,
/// arbitrary non-empty strings after) to child indices, in first-created
/// order. `word_index.is_some()` marks the end of a word; the index is the
/// word's position in corpus order.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
struct TrieNode {
    edges: Vec<(Box<str>, usize)>,
    word_index: Option<usize>,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            edges: Vec::new(),
            word_index: None,
        }
    }

    fn is_word_end(&self) -> bool {
        self.word_index.is_some()
    }
}

/// A fuzzy-search result: a vocabulary word within the distance bound.
///
/// # Sorting
///
/// Matches order by [`adjusted_distance`](FuzzyMatch::adjusted_distance)
/// ascending, then by insertion index ascending, so that near-ties between
/// a common and a rare word resolve toward the common one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FuzzyMatch {
    /// The matched vocabulary word (lowercased, as stored).
    pub word: String,

    /// Weighted edit distance from the query.
    pub distance: usize,

    /// The word's insertion index (corpus order).
    pub index: usize,
}

impl FuzzyMatch {
    /// Distance with the rarity penalty applied: words inserted after the
    /// first 5000 pay `0.01` per position past the cutoff, biasing ties
    /// and near-ties toward more common words.
    pub fn adjusted_distance(&self) -> f64 {
        self.distance as f64
            + self.index.saturating_sub(COMMON_INDEX_CUTOFF) as f64 * RARITY_PENALTY_STEP
    }
}

impl Ord for FuzzyMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.adjusted_distance()
            .total_cmp(&other.adjusted_distance())
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for FuzzyMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for FuzzyMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (distance: {}, index: {})",
            self.word, self.distance, self.index
        )
    }
}

/// Arena-backed compressed prefix tree over a lowercased vocabulary.
///
/// Words are case-insensitive keys: [`insert`](RadixTrie::insert)
/// lowercases, and every query lowercases its input to match. Once
/// [`compress`](RadixTrie::compress) has run, single-child chains are
/// collapsed into multi-character edges; queries work identically before
/// and after compression.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RadixTrie {
    nodes: Vec<TrieNode>,
    next_index: usize,
    word_count: usize,
}

impl RadixTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        RadixTrie {
            nodes: vec![TrieNode::new()],
            next_index: 0,
            word_count: 0,
        }
    }

    /// Build a trie from a word list: insert every term, then compress.
    ///
    /// Terms should be supplied most-common-first; insertion order doubles
    /// as the commonality ranking used by [`closest`](RadixTrie::closest).
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = RadixTrie::new();
        for term in terms {
            trie.insert(term.as_ref());
        }
        trie.compress();
        trie
    }

    /// Number of distinct words in the trie.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// True if no words have been inserted.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Insert a word, lowercased, one node per character.
    ///
    /// The terminal node receives the next insertion index; the counter is
    /// strictly increasing across the trie's lifetime, so re-inserting a
    /// word moves it later in the commonality ordering.
    pub fn insert(&mut self, word: &str) {
        let word = word.to_lowercase();
        let mut node = 0usize;

        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let label: &str = ch.encode_utf8(&mut buf);

            let next = self.nodes[node]
                .edges
                .iter()
                .find(|(edge, _)| edge.as_ref() == label)
                .map(|(_, child)| *child);

            node = match next {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[node].edges.push((Box::from(label), child));
                    child
                }
            };
        }

        if !self.nodes[node].is_word_end() {
            self.word_count += 1;
        }
        self.nodes[node].word_index = Some(self.next_index);
        self.next_index += 1;
    }

    /// Collapse single-child chains into multi-character edges.
    ///
    /// A non-word-end node with exactly one child is merged into its
    /// parent edge by concatenating labels; the merge repeats on whichever
    /// node then occupies the position, so whole chains collapse in a
    /// single pass. Idempotent, and the set of containable words is
    /// unchanged. Merged-away nodes become unreachable arena slots.
    pub fn compress(&mut self) {
        self.compress_from(0);
    }

    fn compress_from(&mut self, node: usize) {
        for slot in 0..self.nodes[node].edges.len() {
            loop {
                let child = self.nodes[node].edges[slot].1;
                if self.nodes[child].is_word_end() || self.nodes[child].edges.len() != 1 {
                    break;
                }
                let (suffix, grandchild) = {
                    let (label, target) = &self.nodes[child].edges[0];
                    (label.clone(), *target)
                };
                let edge = &mut self.nodes[node].edges[slot];
                let mut merged = String::from(edge.0.as_ref());
                merged.push_str(&suffix);
                edge.0 = merged.into_boxed_str();
                edge.1 = grandchild;
            }
            let target = self.nodes[node].edges[slot].1;
            self.compress_from(target);
        }
    }

    /// Exact containment: true iff `word` (lowercased) was inserted.
    ///
    /// Descent consumes whole edges only — an edge matches iff its label
    /// is an exact prefix of the remaining input — and succeeds only when
    /// the input is fully consumed at a word-end node.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        let mut node = 0usize;
        let mut rest = word.as_str();

        while !rest.is_empty() {
            let hit = self.nodes[node].edges.iter().find_map(|(label, child)| {
                rest.strip_prefix(label.as_ref()).map(|r| (r, *child))
            });
            match hit {
                Some((remaining, child)) => {
                    rest = remaining;
                    node = child;
                }
                None => return false,
            }
        }

        self.nodes[node].is_word_end()
    }

    /// Single-result prefix completion: the first word, in
    /// first-created-edge order, extending `prefix`.
    ///
    /// `None` for an empty prefix or when no word extends it.
    pub fn complete(&self, prefix: &str) -> Option<String> {
        self.completions(prefix, 1).into_iter().next()
    }

    /// Enumerate up to `max_words` words extending `prefix`.
    ///
    /// Unlike [`contains`](RadixTrie::contains), descent allows partial
    /// matches in either direction: an edge matches if the remaining
    /// prefix starts with the edge label *or* the edge label starts with
    /// the remaining prefix, so lookups can stop mid-edge. From the
    /// matched node, words are collected by pre-order depth-first
    /// traversal visiting edges in first-created order — the order words
    /// were first inserted.
    ///
    /// Empty prefix, no match, or `max_words == 0` yield an empty vec.
    pub fn completions(&self, prefix: &str, max_words: usize) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        if prefix.is_empty() || max_words == 0 {
            return Vec::new();
        }

        let mut node = 0usize;
        let mut path = String::new();
        let mut rest = prefix.as_str();

        while !rest.is_empty() {
            let hit = self.nodes[node].edges.iter().find_map(|(label, child)| {
                if let Some(remaining) = rest.strip_prefix(label.as_ref()) {
                    Some((remaining, label, *child))
                } else if label.starts_with(rest) {
                    Some(("", label, *child))
                } else {
                    None
                }
            });
            match hit {
                Some((remaining, label, child)) => {
                    path.push_str(label);
                    node = child;
                    rest = remaining;
                }
                None => return Vec::new(),
            }
        }

        let mut words = Vec::new();
        self.collect_words(node, &mut path, max_words, &mut words);
        words
    }

    /// Pre-order DFS from `node`, appending full words to `out` until the
    /// limit is reached. `word` holds the path spelled so far.
    fn collect_words(&self, node: usize, word: &mut String, limit: usize, out: &mut Vec<String>) {
        if out.len() >= limit {
            return;
        }
        if self.nodes[node].is_word_end() {
            out.push(word.clone());
            if out.len() >= limit {
                return;
            }
        }
        for (label, child) in &self.nodes[node].edges {
            word.push_str(label);
            self.collect_words(*child, word, limit, out);
            word.truncate(word.len() - label.len());
            if out.len() >= limit {
                return;
            }
        }
    }

    /// Rank vocabulary words by weighted edit distance from `target`.
    ///
    /// A known word needs no correction: when
    /// [`contains`](RadixTrie::contains) holds for `target` the result is
    /// empty. Otherwise every word-end is scored with
    /// [`bounded_distance`](crate::distance::bounded_distance) and matches
    /// within the bound are sorted by
    /// [`adjusted_distance`](FuzzyMatch::adjusted_distance) ascending,
    /// ties by ascending insertion index.
    pub fn closest(&self, target: &str, max_distance: usize) -> Vec<FuzzyMatch> {
        let target = target.to_lowercase();
        if self.contains(&target) {
            return Vec::new();
        }

        let mut matches = Vec::new();
        let mut word = String::new();
        self.scan_words(0, &mut word, &mut |word, index| {
            let distance = bounded_distance(word, &target, max_distance);
            if distance <= max_distance {
                matches.push(FuzzyMatch {
                    word: word.to_string(),
                    distance,
                    index,
                });
            }
        });

        matches.sort();
        matches
    }

    /// Depth-first visit of every word-end, yielding the spelled word and
    /// its insertion index.
    fn scan_words(&self, node: usize, word: &mut String, visit: &mut impl FnMut(&str, usize)) {
        if let Some(index) = self.nodes[node].word_index {
            visit(word.as_str(), index);
        }
        for (label, child) in &self.nodes[node].edges {
            word.push_str(label);
            self.scan_words(*child, word, visit);
            word.truncate(word.len() - label.len());
        }
    }
}

impl Default for RadixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Completer for RadixTrie {
    fn complete(&mut self, prefix: &str) -> Option<String> {
        RadixTrie::complete(self, prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trie() -> RadixTrie {
        RadixTrie::from_terms(["car", "cat", "pot"])
    }

    #[test]
    fn test_contains_after_insert() {
        let mut trie = RadixTrie::new();
        trie.insert("hello");
        trie.insert("help");
        assert!(trie.contains("hello"));
        assert!(trie.contains("help"));
        assert!(!trie.contains("hel"));
        assert!(!trie.contains("helping"));
    }

    #[test]
    fn test_contains_survives_compression() {
        let words = ["romane", "romanus", "romulus", "rubens", "ruber", "rubicon"];
        let mut trie = RadixTrie::new();
        for w in words {
            trie.insert(w);
        }
        trie.compress();
        for w in words {
            assert!(trie.contains(w), "lost {} after compression", w);
        }
        assert!(!trie.contains("rom"));
        assert!(!trie.contains("rubiconn"));
    }

    #[test]
    fn test_compression_is_idempotent() {
        let mut trie = sample_trie();
        let before = trie.completions("c", 10);
        trie.compress();
        trie.compress();
        assert_eq!(trie.completions("c", 10), before);
        assert!(trie.contains("car"));
        assert!(trie.contains("cat"));
        assert!(trie.contains("pot"));
    }

    #[test]
    fn test_case_insensitive_keys() {
        let mut trie = RadixTrie::new();
        trie.insert("Hello");
        assert!(trie.contains("hello"));
        assert!(trie.contains("HELLO"));
        assert_eq!(trie.complete("HEL"), Some("hello".to_string()));
    }

    #[test]
    fn test_prefix_completion_order() {
        let trie = sample_trie();
        // Insertion order decides enumeration order: car before cat.
        assert_eq!(trie.completions("ca", 2), vec!["car", "cat"]);
        assert_eq!(trie.complete("ca"), Some("car".to_string()));
        assert_eq!(trie.complete("po"), Some("pot".to_string()));
    }

    #[test]
    fn test_completion_stops_mid_edge() {
        let trie = RadixTrie::from_terms(["background", "backlog"]);
        // After compression "ground" and "log" are single edges; the
        // prefix ends inside them.
        assert_eq!(trie.complete("backg"), Some("background".to_string()));
        assert_eq!(trie.complete("backl"), Some("backlog".to_string()));
        assert_eq!(trie.completions("back", 5), vec!["background", "backlog"]);
    }

    #[test]
    fn test_completion_empty_and_unknown_prefix() {
        let trie = sample_trie();
        assert_eq!(trie.complete(""), None);
        assert!(trie.completions("", 3).is_empty());
        assert_eq!(trie.complete("zebra"), None);
        assert!(trie.completions("zebra", 3).is_empty());
    }

    #[test]
    fn test_completion_limit() {
        let trie = RadixTrie::from_terms(["a", "ab", "abc", "abcd"]);
        assert_eq!(trie.completions("a", 2), vec!["a", "ab"]);
        assert_eq!(trie.completions("a", 10).len(), 4);
    }

    #[test]
    fn test_closest_known_word_is_empty() {
        let trie = sample_trie();
        assert!(trie.closest("cat", 2).is_empty());
        assert!(trie.closest("CAT", 2).is_empty());
    }

    #[test]
    fn test_closest_respects_bound() {
        let trie = sample_trie();
        for m in trie.closest("cta", 2) {
            assert!(m.distance <= 2);
        }
        // "pot" is 3 edits from "cta": excluded at bound 2.
        assert!(trie.closest("cta", 2).iter().all(|m| m.word != "pot"));
    }

    #[test]
    fn test_closest_tie_breaks_by_insertion_index() {
        let trie = sample_trie();
        let matches = trie.closest("cta", 2);
        // car (index 0) and cat (index 1) both at distance 2.
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].word, "car");
        assert_eq!(matches[1].word, "cat");
        assert_eq!(matches[0].distance, 2);
        assert_eq!(matches[1].distance, 2);
    }

    #[test]
    fn test_closest_prefers_smaller_distance() {
        let trie = RadixTrie::from_terms(["zebra", "cart", "cat"]);
        let matches = trie.closest("cas", 2);
        // cat: one substitution; cart: substitution + deletion.
        assert_eq!(matches[0].word, "cat");
        assert_eq!(matches[0].distance, 1);
    }

    #[test]
    fn test_rarity_penalty_past_cutoff() {
        let mut trie = RadixTrie::new();
        // Fill the first 5001 indices, then add two near-identical words.
        for i in 0..5001 {
            trie.insert(&format!("filler{:05}", i));
        }
        trie.insert("later"); // index 5001: penalized by 0.01
        trie.compress();

        let matches = trie.closest("latex", 1);
        let later = matches.iter().find(|m| m.word == "later").unwrap();
        assert_eq!(later.distance, 1);
        assert!(later.adjusted_distance() > 1.0);

        // A word inside the cutoff carries no penalty.
        let common = FuzzyMatch {
            word: "x".into(),
            distance: 1,
            index: 4999,
        };
        assert_eq!(common.adjusted_distance(), 1.0);
    }

    #[test]
    fn test_duplicate_insert_reassigns_index() {
        let mut trie = RadixTrie::new();
        trie.insert("alpha");
        trie.insert("beta");
        trie.insert("alpha"); // re-insert: index moves to 2
        trie.compress();
        assert_eq!(trie.len(), 2);

        let matches = trie.closest("bete", 2);
        let beta = matches.iter().find(|m| m.word == "beta").unwrap();
        assert_eq!(beta.index, 1);
        let alpha_like = trie.closest("alphc", 2);
        assert_eq!(alpha_like[0].index, 2);
    }

    #[test]
    fn test_len_counts_distinct_words() {
        let mut trie = RadixTrie::new();
        assert!(trie.is_empty());
        trie.insert("one");
        trie.insert("two");
        trie.insert("one");
        assert_eq!(trie.len(), 2);
    }
}
