//! # libtypeahead
//!
//! Predictive-text primitives for editors and input methods: as the user
//! types, answer "what word is this?" and "what word comes next?" from an
//! in-memory corpus, with no I/O of any kind.
//!
//! Two independent query engines share one construction-time corpus:
//!
//! - [`dictionary::RadixTrie`] — a compressed prefix tree over the
//!   vocabulary, answering exact containment, prefix enumeration, and
//!   typo-tolerant nearest-match ranking under the bounded weighted edit
//!   distance in [`distance`].
//! - [`ngram::NgramModel`] — a frequency table over fixed-length word
//!   windows, greedily extending a typed prefix into a multi-word
//!   suggestion with a stable cached completion.
//!
//! The two are peers, not layers; a host combines their answers through
//! the shared [`dictionary::Completer`] contract.
//!
//! ## Example
//!
//! ```rust
//! use libtypeahead::prelude::*;
//!
//! // Vocabulary queries: completion and typo correction.
//! let trie = RadixTrie::from_terms(["hello", "help", "held", "world"]);
//! assert!(trie.contains("help"));
//! assert_eq!(trie.complete("hel"), Some("hello".to_string()));
//!
//! let corrections = trie.closest("wrold", 2);
//! assert_eq!(corrections[0].word, "world");
//!
//! // Next-word prediction from observed sequences.
//! let mut model = NgramModel::from_text(
//!     "hello world. hello there. hello world.",
//!     2,
//! ).unwrap();
//! assert_eq!(model.complete("hello", 1), "hello world");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dictionary;
pub mod distance;
pub mod ngram;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::dictionary::{Completer, FuzzyMatch, RadixTrie};
    pub use crate::distance::{bounded_distance, weighted_distance};
    pub use crate::ngram::{
        is_sentence_end, tokenize, FrequencyTable, ModelError, NgramModel, DEFAULT_WINDOW_SIZE,
        SENTENCE_MARK,
    };
}
