// SpellChecker: classifies tokens as known words or non-words and attaches
// ranked corrections to the non-words.
//
// Owns the channel model, the language model, the candidate generator and
// the tokenizer used by the `*_line` methods. Tokens are lowercased before
// any lookup and emitted lowercased.

use chanspell_channel::ChannelModel;
use chanspell_core::character::{is_punctuation_literal, lowercase_word};
use chanspell_core::token::neighbors;

use crate::SpellError;
use crate::language_model::LanguageModel;
use crate::suggestion::{
    CandidateGenerator, CandidateRanker, DEFAULT_MAX_DISTANCE, RankWeights, ScoredCandidate,
};
use crate::tokenizer::{SimpleTokenizer, Tokenizer};

/// Default number of suggestions kept by `suggest_*`.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Checker options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckerOptions {
    /// Edit budget for candidate generation.
    pub max_distance: usize,
    /// Suggestions kept per non-word by `suggest_sentence` / `suggest_line`.
    pub max_suggestions: usize,
    /// Scoring weights.
    pub weights: RankWeights,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            weights: RankWeights::default(),
        }
    }
}

impl CheckerOptions {
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    pub fn with_weights(mut self, weights: RankWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Result of `suggest_*` for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCheck {
    /// A known word or punctuation literal.
    Correct(String),
    /// Best-first corrections for a non-word.
    Suggestions(Vec<String>),
}

/// Noisy-channel spell checker.
pub struct SpellChecker<L: LanguageModel> {
    channel: ChannelModel,
    language_model: L,
    generator: CandidateGenerator,
    options: CheckerOptions,
    tokenizer: Box<dyn Tokenizer + Send + Sync>,
}

impl<L: LanguageModel> SpellChecker<L> {
    pub fn new(channel: ChannelModel, language_model: L) -> Self {
        let options = CheckerOptions::default();
        Self {
            channel,
            language_model,
            generator: CandidateGenerator::new(options.max_distance),
            options,
            tokenizer: Box::new(SimpleTokenizer),
        }
    }

    pub fn with_options(mut self, options: CheckerOptions) -> Self {
        self.generator = CandidateGenerator::new(options.max_distance);
        self.options = options;
        self
    }

    /// Replace the tokenizer used by the `*_line` methods.
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + Send + Sync + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// The channel model. It can be retrained in place while the checker
    /// is in use.
    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    pub fn language_model(&self) -> &L {
        &self.language_model
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    // =========================================================================
    // Single tokens
    // =========================================================================

    /// Whether `token` is a known word or a punctuation literal.
    pub fn is_known(&self, token: &str) -> bool {
        let word = lowercase_word(token);
        self.language_model.contains(&word) || is_punctuation_literal(&word)
    }

    /// Ranked corrections for `word` between `prev` and `next`.
    ///
    /// Does not check whether `word` is already known.
    pub fn suggestions_for(
        &self,
        word: &str,
        prev: &str,
        next: &str,
    ) -> Result<Vec<ScoredCandidate>, SpellError> {
        let word = lowercase_word(word);
        let prev = lowercase_word(prev);
        let next = lowercase_word(next);

        let candidates = self.generator.generate(&word, &self.language_model);
        log::debug!("{word:?}: {} candidates", candidates.len());

        let ranked = CandidateRanker::new(&self.channel, &self.language_model)
            .with_weights(self.options.weights)
            .rank(&word, &prev, &next, &candidates)?;
        Ok(ranked)
    }

    // =========================================================================
    // Sentences
    // =========================================================================

    /// One list per token: `[word]` for known tokens, ranked corrections
    /// otherwise.
    ///
    /// With `fallback`, a non-word without corrections yields `[word]`
    /// instead of an empty list.
    pub fn check_sentence<S: AsRef<str>>(
        &self,
        tokens: &[S],
        fallback: bool,
    ) -> Result<Vec<Vec<String>>, SpellError> {
        let mut checked = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let word = lowercase_word(token.as_ref());
            if self.is_known(&word) {
                checked.push(vec![word]);
                continue;
            }

            let (prev, next) = neighbors(tokens, index);
            let ranked = self.suggestions_for(&word, prev, next)?;
            if ranked.is_empty() && fallback {
                checked.push(vec![word]);
            } else {
                checked.push(ranked.into_iter().map(|c| c.word).collect());
            }
        }
        Ok(checked)
    }

    /// Replace every non-word with its best correction.
    ///
    /// Non-words without corrections are kept (lowercased).
    pub fn autocorrect_sentence<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Vec<String>, SpellError> {
        let checked = self.check_sentence(tokens, true)?;
        Ok(checked
            .into_iter()
            .zip(tokens)
            .map(|(options, token)| {
                options
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| lowercase_word(token.as_ref()))
            })
            .collect())
    }

    /// Known tokens as [`TokenCheck::Correct`], non-words with at most
    /// `max_suggestions` corrections.
    pub fn suggest_sentence<S: AsRef<str>>(
        &self,
        tokens: &[S],
        max_suggestions: usize,
    ) -> Result<Vec<TokenCheck>, SpellError> {
        let checked = self.check_sentence(tokens, true)?;
        Ok(checked
            .into_iter()
            .zip(tokens)
            .map(|(mut options, token)| {
                if self.is_known(token.as_ref()) {
                    TokenCheck::Correct(lowercase_word(token.as_ref()))
                } else {
                    options.truncate(max_suggestions);
                    TokenCheck::Suggestions(options)
                }
            })
            .collect())
    }

    // =========================================================================
    // Raw text
    // =========================================================================

    /// Split `line` into sentences with the configured tokenizer.
    pub fn sentences(&self, line: &str) -> Vec<Vec<String>> {
        self.tokenizer.sentences(line)
    }

    /// Tokenize `line` and run [`check_sentence`](Self::check_sentence) on
    /// each sentence, concatenating the results.
    pub fn check_line(&self, line: &str, fallback: bool) -> Result<Vec<Vec<String>>, SpellError> {
        let mut checked = Vec::new();
        for sentence in self.sentences(line) {
            checked.extend(self.check_sentence(&sentence, fallback)?);
        }
        Ok(checked)
    }

    pub fn autocorrect_line(&self, line: &str) -> Result<Vec<String>, SpellError> {
        let mut corrected = Vec::new();
        for sentence in self.sentences(line) {
            corrected.extend(self.autocorrect_sentence(&sentence)?);
        }
        Ok(corrected)
    }

    /// Like [`suggest_sentence`](Self::suggest_sentence), using the
    /// configured `max_suggestions`.
    pub fn suggest_line(&self, line: &str) -> Result<Vec<TokenCheck>, SpellError> {
        let mut suggested = Vec::new();
        for sentence in self.sentences(line) {
            suggested.extend(self.suggest_sentence(&sentence, self.options.max_suggestions)?);
        }
        Ok(suggested)
    }
}
