//! Learned noisy-channel edit model.
//!
//! This crate learns per-character probabilities `P(observed | intended)`
//! from a corpus of misspellings and uses them as edit costs in a
//! four-operation alignment (delete, substitute, insert, transpose).
//!
//! # Architecture
//!
//! - [`cost`] -- fixed-size probability table and the edit costs derived from it
//! - [`alignment`] -- dynamic-programming alignment with backtrace
//! - [`model`] -- shared, atomically replaceable model handle and channel log-probability
//! - [`trainer`] -- hard-EM fixed-point re-estimation loop
//! - [`corpus`] -- `observed,intended` corpus reader
//! - [`snapshot`] -- serializable form of the probability table

pub mod alignment;
pub mod corpus;
pub mod cost;
pub mod model;
pub mod snapshot;
pub mod trainer;

pub use alignment::{Alignment, EditPair, Operation, align};
pub use corpus::{Corpus, Misspelling};
pub use cost::CostModel;
pub use model::ChannelModel;
pub use snapshot::CostSnapshot;
pub use trainer::{Trainer, TrainerConfig, TrainingReport};

use chanspell_core::Symbol;

/// Error type for corpus parsing, model persistence and channel scoring.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// A corpus line that is not exactly one `observed,intended` pair.
    #[error("malformed corpus line {line}: {content:?}")]
    MalformedCorpusLine { line: usize, content: String },

    /// Reading the corpus or a model file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A model snapshot could not be encoded or decoded.
    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A decoded snapshot does not describe a complete, normalized table.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A smoothing prior that is not a positive finite number.
    #[error("prior must be positive and finite, got {0}")]
    InvalidPrior(f64),

    /// A table cell used for scoring is not a positive probability.
    ///
    /// The smoothing prior makes this unreachable for tables built by the
    /// trainer; hitting it means the table was corrupted.
    #[error("no usable probability P({observed} | {intended}) = {probability}")]
    ProbabilityLookup {
        intended: Symbol,
        observed: Symbol,
        probability: f64,
    },
}
