//! Statistical next-word prediction over fixed-length word windows.
//!
//! [`NgramModel`] tabulates every `n`-token window of a corpus into a
//! [`FrequencyTable`], turns the counts into corpus-wide frequencies, and
//! greedily extends a typed prefix one predicted word at a time. The
//! probabilities are global frequencies — deliberately *not* conditioned
//! on the shared window prefix — which keeps ranking compatible with the
//! engine this module models.

pub mod error;

mod model;
mod table;

pub use error::{ModelError, Result};
pub use model::{is_sentence_end, tokenize, NgramModel, DEFAULT_WINDOW_SIZE, SENTENCE_MARK};
pub use table::FrequencyTable;
