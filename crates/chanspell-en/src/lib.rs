//! English spelling suggestions over a learned noisy-channel model.
//!
//! Non-words are corrected by searching their edit neighborhood for known
//! words and ranking the hits by channel likelihood and sentence context.
//!
//! # Architecture
//!
//! - [`language_model`] -- vocabulary / language-model traits and a counting model
//! - [`tokenizer`] -- word and sentence segmentation of raw lines
//! - [`suggestion`] -- edit generators, bounded candidate search, ranking
//! - [`checker`] -- per-token classification, autocorrection and suggestion lists

pub mod checker;
pub mod language_model;
pub mod suggestion;
pub mod tokenizer;

pub use checker::{CheckerOptions, SpellChecker, TokenCheck};
pub use language_model::{CountingLanguageModel, LanguageModel, Vocabulary};
pub use suggestion::{CandidateGenerator, CandidateRanker, RankWeights, ScoredCandidate};
pub use tokenizer::{SimpleTokenizer, Tokenizer};

use chanspell_channel::ChannelError;

/// Error type for checking text and loading a language model.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    /// Channel scoring failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Reading language-model text failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
