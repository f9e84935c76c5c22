// Language model boundary and a small counting reference model
//
// The checker only needs three total functions from a language model:
// membership, unigram log-probability and bigram log-probability. Unknown
// words must never fail; they get a smoothed low score.

use std::fs;
use std::hash::BuildHasher;
use std::path::Path;

use chanspell_core::token::{SENTENCE_END, SENTENCE_START};
use hashbrown::HashMap;

use crate::SpellError;
use crate::tokenizer::{SimpleTokenizer, Tokenizer};

/// Default add-k smoothing constant.
pub const DEFAULT_SMOOTHING_K: f64 = 0.01;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Membership oracle used by candidate generation.
pub trait Vocabulary {
    /// Whether `word` (already lowercased) is a known word.
    fn contains(&self, word: &str) -> bool;
}

/// Language model consumed by ranking.
///
/// All methods are total: unknown words and contexts return a finite,
/// smoothed log-probability.
pub trait LanguageModel: Vocabulary {
    /// Log-probability of `word` with no context.
    fn unigram_log_prob(&self, word: &str) -> f64;

    /// Log-probability of `next` following `prev`.
    fn bigram_log_prob(&self, prev: &str, next: &str) -> f64;
}

impl<S: BuildHasher> Vocabulary for std::collections::HashSet<String, S> {
    fn contains(&self, word: &str) -> bool {
        std::collections::HashSet::contains(self, word)
    }
}

impl<S: BuildHasher> Vocabulary for hashbrown::HashSet<String, S> {
    fn contains(&self, word: &str) -> bool {
        hashbrown::HashSet::contains(self, word)
    }
}

// ---------------------------------------------------------------------------
// CountingLanguageModel
// ---------------------------------------------------------------------------

/// Unigram/bigram counts with add-k smoothing, natural-log probabilities.
///
/// Sentences are padded with `<s>` / `</s>` for bigram counting; the
/// markers are not vocabulary words.
#[derive(Debug, Clone)]
pub struct CountingLanguageModel {
    /// Word -> occurrences (markers excluded).
    unigrams: HashMap<String, u64>,
    /// Left context -> right word -> occurrences.
    bigrams: HashMap<String, HashMap<String, u64>>,
    /// Left context -> occurrences as a left context.
    contexts: HashMap<String, u64>,
    /// Total word tokens (markers excluded).
    total_words: u64,
    smoothing_k: f64,
}

impl CountingLanguageModel {
    pub fn new(smoothing_k: f64) -> Self {
        Self {
            unigrams: HashMap::new(),
            bigrams: HashMap::new(),
            contexts: HashMap::new(),
            total_words: 0,
            smoothing_k,
        }
    }

    /// Build a model from pre-tokenized sentences.
    pub fn from_sentences<I, S>(sentences: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut model = Self::new(DEFAULT_SMOOTHING_K);
        for sentence in sentences {
            model.add_sentence(sentence.as_ref());
        }
        model
    }

    /// Build a model from raw text, one or more sentences per line.
    pub fn from_text(text: &str) -> Self {
        let tokenizer = SimpleTokenizer;
        let mut model = Self::new(DEFAULT_SMOOTHING_K);
        for line in text.lines() {
            for sentence in tokenizer.sentences(line) {
                model.add_sentence(&sentence);
            }
        }
        model
    }

    /// Read a text file and build a model from it.
    pub fn load(path: &Path) -> Result<Self, SpellError> {
        let text = fs::read_to_string(path)?;
        let model = Self::from_text(&text);
        log::debug!(
            "language model from {}: {} types, {} tokens",
            path.display(),
            model.unigrams.len(),
            model.total_words
        );
        Ok(model)
    }

    /// Count one sentence. Tokens are lowercased.
    pub fn add_sentence<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let mut prev = SENTENCE_START.to_string();
        for token in tokens {
            let word = token.as_ref().to_lowercase();
            *self.unigrams.entry(word.clone()).or_insert(0) += 1;
            self.total_words += 1;
            self.count_bigram(&prev, &word);
            prev = word;
        }
        if !tokens.is_empty() {
            self.count_bigram(&prev, SENTENCE_END);
        }
    }

    fn count_bigram(&mut self, prev: &str, next: &str) {
        *self.contexts.entry_ref(prev).or_insert(0) += 1;
        *self
            .bigrams
            .entry_ref(prev)
            .or_default()
            .entry_ref(next)
            .or_insert(0) += 1;
    }

    /// Number of distinct words plus one slot for unseen words.
    fn vocabulary_size(&self) -> f64 {
        (self.unigrams.len() + 1) as f64
    }

    /// Occurrences of `word`.
    pub fn count(&self, word: &str) -> u64 {
        self.unigrams.get(word).copied().unwrap_or(0)
    }
}

impl Default for CountingLanguageModel {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_K)
    }
}

impl Vocabulary for CountingLanguageModel {
    fn contains(&self, word: &str) -> bool {
        self.unigrams.contains_key(word)
    }
}

impl LanguageModel for CountingLanguageModel {
    fn unigram_log_prob(&self, word: &str) -> f64 {
        let k = self.smoothing_k;
        let numerator = self.count(word) as f64 + k;
        let denominator = self.total_words as f64 + k * self.vocabulary_size();
        (numerator / denominator).ln()
    }

    fn bigram_log_prob(&self, prev: &str, next: &str) -> f64 {
        let k = self.smoothing_k;
        let pair = self
            .bigrams
            .get(prev)
            .and_then(|row| row.get(next))
            .copied()
            .unwrap_or(0);
        let context = self.contexts.get(prev).copied().unwrap_or(0);
        let numerator = pair as f64 + k;
        let denominator = context as f64 + k * self.vocabulary_size();
        (numerator / denominator).ln()
    }
}
