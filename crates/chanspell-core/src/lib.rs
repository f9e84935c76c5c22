//! Shared types for the chanspell noisy-channel spelling corrector.
//!
//! - [`symbol`] -- the closed 28-symbol alphabet (a-z, UNKNOWN, BLANK)
//! - [`character`] -- character classes, punctuation literals, lowercasing
//! - [`token`] -- tokens, sentences and sentence-boundary markers

pub mod character;
pub mod symbol;
pub mod token;

pub use symbol::{BLANK_CHAR, LETTERS, SYMBOL_COUNT, Symbol};
