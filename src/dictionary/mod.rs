//! Vocabulary index for prefix completion and typo-tolerant lookup.
//!
//! The [`RadixTrie`] is the dictionary half of the engine: it answers
//! exact containment, prefix enumeration, and bounded fuzzy search over a
//! lowercased vocabulary. The statistical half lives in [`crate::ngram`];
//! the two are peers, not layers, and share only the query contract
//! captured by [`Completer`].

pub mod radix_trie;

pub use radix_trie::{FuzzyMatch, RadixTrie};

/// The query contract shared by both engine halves: given the text typed
/// so far, produce a single completion or nothing.
///
/// Takes `&mut self` because the n-gram model keeps a suggestion cache
/// across calls; the trie implementation is read-only and simply does not
/// use the mutability. A host can hold heterogeneous suggestion sources as
/// `Vec<Box<dyn Completer>>` and merge their answers.
///
/// # Examples
///
/// ```
/// use libtypeahead::prelude::*;
///
/// let mut sources: Vec<Box<dyn Completer>> = vec![
///     Box::new(RadixTrie::from_terms(["hello", "help", "held"])),
///     Box::new(NgramModel::from_text("hello world hello there", 2).unwrap()),
/// ];
///
/// let suggestions: Vec<String> = sources
///     .iter_mut()
///     .filter_map(|s| s.complete("hel"))
///     .collect();
/// assert!(suggestions.contains(&"hello".to_string()));
/// ```
pub trait Completer {
    /// Complete `prefix` into a full suggestion, or return `None` when the
    /// source has nothing to offer.
    fn complete(&mut self, prefix: &str) -> Option<String>;
}
