// Single-edit generators: each applies one class of edit operation to a
// word and keeps the results the vocabulary accepts.

use chanspell_core::LETTERS;

use crate::language_model::Vocabulary;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Produces every in-vocabulary word exactly one edit of a given kind away.
pub trait EditGenerator {
    /// Push accepted candidates for `word` onto `out`, in generation order.
    fn expand(&self, word: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>);
}

/// Check a candidate buffer against the vocabulary and keep it if known.
fn keep_if_known(buffer: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>) {
    let candidate: String = buffer.iter().collect();
    if vocabulary.contains(&candidate) {
        out.push(candidate);
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Insert each letter at every position, including the end.
pub struct Insertion;

impl EditGenerator for Insertion {
    fn expand(&self, word: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>) {
        let mut buffer = Vec::with_capacity(word.len() + 1);
        for position in 0..=word.len() {
            for &letter in &LETTERS {
                buffer.clear();
                buffer.extend_from_slice(&word[..position]);
                buffer.push(letter);
                buffer.extend_from_slice(&word[position..]);
                keep_if_known(&buffer, vocabulary, out);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Delete one character at each position.
pub struct Deletion;

impl EditGenerator for Deletion {
    fn expand(&self, word: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>) {
        let mut buffer = Vec::with_capacity(word.len());
        for position in 0..word.len() {
            buffer.clear();
            buffer.extend_from_slice(&word[..position]);
            buffer.extend_from_slice(&word[position + 1..]);
            keep_if_known(&buffer, vocabulary, out);
        }
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Replace each character with every other letter.
pub struct Substitution;

impl EditGenerator for Substitution {
    fn expand(&self, word: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>) {
        let mut buffer = word.to_vec();
        for position in 0..word.len() {
            for &letter in &LETTERS {
                if letter == word[position] {
                    continue;
                }
                buffer[position] = letter;
                keep_if_known(&buffer, vocabulary, out);
            }
            buffer[position] = word[position];
        }
    }
}

// ---------------------------------------------------------------------------
// Transposition
// ---------------------------------------------------------------------------

/// Swap each adjacent pair of characters.
///
/// Pairs of identical characters are skipped: swapping them gives back the
/// word itself.
pub struct Transposition;

impl EditGenerator for Transposition {
    fn expand(&self, word: &[char], vocabulary: &dyn Vocabulary, out: &mut Vec<String>) {
        let mut buffer = word.to_vec();
        for position in 0..word.len().saturating_sub(1) {
            if word[position] == word[position + 1] {
                continue;
            }
            buffer.swap(position, position + 1);
            keep_if_known(&buffer, vocabulary, out);
            buffer.swap(position, position + 1);
        }
    }
}

/// The four edit generators in expansion order.
pub fn default_edit_generators() -> Vec<Box<dyn EditGenerator + Send + Sync>> {
    vec![
        Box::new(Insertion),
        Box::new(Deletion),
        Box::new(Substitution),
        Box::new(Transposition),
    ]
}
