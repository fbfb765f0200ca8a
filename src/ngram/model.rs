//! Word-level n-gram model with greedy multi-word completion.

use rustc_hash::FxHashSet;

use super::table::FrequencyTable;
use super::{ModelError, Result};
use crate::dictionary::Completer;

/// Window size used when the caller does not specify one.
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// Reserved end-of-sentence marker character.
///
/// A token ending in this character terminates a sentence exactly like
/// `.`, `!` or `?` do; callers can append it to force a boundary without
/// punctuation. The marker is stripped from stored table keys and from
/// sanitized predictions.
pub const SENTENCE_MARK: char = '¶';

/// Split `text` on runs of whitespace.
///
/// This is the only tokenization the engine performs; anything fancier
/// (punctuation splitting, stemming) is the caller's business.
///
/// # Examples
///
/// ```
/// use libtypeahead::ngram::tokenize;
///
/// assert_eq!(tokenize("hi  there "), vec!["hi", "there"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// True if `token` ends a sentence: terminal `.`, `!`, `?`, or the
/// reserved [`SENTENCE_MARK`].
pub fn is_sentence_end(token: &str) -> bool {
    token.ends_with(['.', '!', '?', SENTENCE_MARK])
}

/// Strip sentence-ending punctuation, the marker, and surrounding
/// whitespace from a predicted word.
fn sanitize_word(word: &str) -> String {
    word.trim()
        .trim_end_matches(['.', '!', '?', SENTENCE_MARK])
        .to_string()
}

/// A statistical language model over fixed-length word windows.
///
/// Construction slides a window of `window_size` tokens across the corpus,
/// counts each window, and normalizes the counts into a *global* frequency
/// distribution: each window's count over the total, not a probability
/// conditioned on the window's prefix. See
/// [`suggest_next_word`](NgramModel::suggest_next_word) for why that
/// distinction matters for ranking. The model is
/// immutable after construction except for one deliberate piece of state:
/// the last accepted suggestion, cached so that a suggestion stays stable
/// while the user types toward it.
///
/// # Examples
///
/// ```
/// use libtypeahead::ngram::NgramModel;
///
/// let mut model = NgramModel::from_text(
///     "the quick brown fox. the quick red fox.",
///     2,
/// ).unwrap();
///
/// assert_eq!(model.complete("the", 2), "the quick brown");
///
/// // The cached suggestion survives incremental retyping toward it.
/// assert_eq!(model.complete("the quick b", 2), "the quick brown");
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NgramModel {
    window_size: usize,
    table: FrequencyTable,
    last_suggestion: String,
}

impl NgramModel {
    /// Build a model from raw text tokenized on whitespace.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidWindowSize`] if `window_size` is zero.
    pub fn from_text(text: &str, window_size: usize) -> Result<Self> {
        Self::from_tokens(tokenize(text), window_size)
    }

    /// Build a model from an already-tokenized corpus.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidWindowSize`] if `window_size` is zero.
    pub fn from_tokens(tokens: Vec<String>, window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(ModelError::InvalidWindowSize(window_size));
        }

        let mut table = Self::tabulate(&tokens, window_size);
        table.normalize();

        Ok(NgramModel {
            window_size,
            table,
            last_suggestion: String::new(),
        })
    }

    /// The configured window size `n`.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// The probability table (insertion-ordered).
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Replace the probability table wholesale.
    ///
    /// The replacement is taken as-is; re-deriving probabilities from raw
    /// text means building a new model.
    pub fn set_table(&mut self, table: FrequencyTable) {
        self.table.replace(table);
    }

    /// Slide a window of `window_size` tokens across the corpus and count
    /// each occurrence.
    ///
    /// A window is skipped when any of its first `window_size - 1` tokens
    /// ends a sentence: the conditioning context of an n-gram must not
    /// span a sentence boundary, while the window's final token may itself
    /// end one (predicting the sentence-ending word stays representable).
    fn tabulate(tokens: &[String], window_size: usize) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        if tokens.len() < window_size {
            return table;
        }

        for window in tokens.windows(window_size) {
            let context = &window[..window_size - 1];
            if context.iter().any(|token| is_sentence_end(token)) {
                continue;
            }

            let raw = window.join(" ");
            // The increment reads the raw key while the stored key has the
            // marker stripped; the keys only diverge for marker-carrying
            // input, where stripped twins overwrite instead of accumulate.
            let count = table.get(&raw).unwrap_or(0.0) + 1.0;
            let key: String = raw.chars().filter(|&c| c != SENTENCE_MARK).collect();
            table.insert(key, count);
        }

        table
    }

    /// Predict the word most likely to follow `sequence`.
    ///
    /// Scans the table in insertion order, keeping the entry with the
    /// highest probability whose leading `n - 1` tokens are a
    /// case-insensitive suffix of `sequence`. An entry must *strictly*
    /// improve on the best seen so far, so the first-encountered n-gram
    /// wins probability ties; the scan stops the instant a probability of
    /// exactly 1 is seen. Because probabilities are global frequencies, a
    /// longer or more specific match does **not** outrank a globally more
    /// frequent one — the only precedence is "first-encountered,
    /// globally-highest".
    ///
    /// With `sanitize`, sentence-ending punctuation and surrounding
    /// whitespace are stripped from the returned word.
    ///
    /// Returns `None` when no n-gram context matches.
    pub fn suggest_next_word(&self, sequence: &str, sanitize: bool) -> Option<String> {
        let sequence = sequence.to_lowercase();
        let mut best_probability = 0.0_f64;
        let mut best_word: Option<&str> = None;

        for (key, probability) in self.table.iter() {
            if probability <= best_probability {
                continue;
            }

            let (context, word) = match key.rsplit_once(' ') {
                Some((context, word)) => (context, word),
                None => ("", key),
            };

            if sequence.ends_with(&context.to_lowercase()) {
                best_probability = probability;
                best_word = Some(word);
            }

            if probability == 1.0 {
                break;
            }
        }

        best_word.map(|word| {
            if sanitize {
                sanitize_word(word)
            } else {
                word.to_string()
            }
        })
    }

    /// Greedily extend `prefix` by up to `max_words` predicted words.
    ///
    /// Each round keys the prediction on the last `n - 1` tokens of the
    /// growing sequence and stops on the first of: a repeated key (cycle
    /// guard against self-referential table data), an empty prediction, a
    /// sentence-ending prediction (appended first), or `max_words` rounds.
    ///
    /// The last suggestion that extended its prefix is cached: as long as
    /// the user keeps typing toward it, the same full suggestion is
    /// returned unchanged rather than recomputed, so the completion does
    /// not flicker under the caret. An empty `prefix` resets the cache and
    /// returns an empty string.
    pub fn complete(&mut self, prefix: &str, max_words: usize) -> String {
        let mut words = tokenize(prefix);
        if words.is_empty() {
            self.last_suggestion.clear();
            return String::new();
        }

        let context_len = self.window_size - 1;
        let mut used_keys: FxHashSet<String> = FxHashSet::default();

        for _ in 0..max_words {
            let start = words.len().saturating_sub(context_len);
            let key = words[start..].join(" ");
            if !used_keys.insert(key.clone()) {
                break;
            }

            let word = match self.suggest_next_word(&key, true) {
                Some(word) if !word.is_empty() => word,
                _ => break,
            };

            let ends_sentence = is_sentence_end(&word);
            words.push(word);
            if ends_sentence {
                break;
            }
        }

        let candidate = words.join(" ");
        if candidate != prefix
            && candidate != self.last_suggestion
            && candidate.starts_with(prefix)
        {
            self.last_suggestion = candidate.clone();
        }

        if !self.last_suggestion.is_empty() && self.last_suggestion.starts_with(prefix) {
            self.last_suggestion.clone()
        } else {
            candidate
        }
    }

    /// Single-word convenience wrapper around
    /// [`complete`](NgramModel::complete).
    pub fn complete_one(&mut self, prefix: &str) -> String {
        self.complete(prefix, 1)
    }
}

impl Completer for NgramModel {
    fn complete(&mut self, prefix: &str) -> Option<String> {
        let suggestion = NgramModel::complete(self, prefix, 1);
        if suggestion.is_empty() || suggestion == prefix {
            None
        } else {
            Some(suggestion)
        }
    }
}
