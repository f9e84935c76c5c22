// Candidate ranking: channel log-likelihood plus language-model context

use chanspell_channel::{ChannelError, ChannelModel};

use crate::language_model::LanguageModel;

/// Weights of the linear scoring combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    /// Weight of the channel log-likelihood.
    pub channel: f64,
    /// Weight of the summed bigram and unigram log-probabilities.
    pub language: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            channel: 0.5,
            language: 0.25,
        }
    }
}

/// A candidate with its combined score (higher is better).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub word: String,
    pub score: f64,
}

/// Scores candidates for one error word in its sentence context.
pub struct CandidateRanker<'a, L: LanguageModel + ?Sized> {
    channel: &'a ChannelModel,
    language_model: &'a L,
    weights: RankWeights,
}

impl<'a, L: LanguageModel + ?Sized> CandidateRanker<'a, L> {
    pub fn new(channel: &'a ChannelModel, language_model: &'a L) -> Self {
        Self {
            channel,
            language_model,
            weights: RankWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: RankWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Mean of the left and right bigram log-probabilities.
    pub fn bigram_score(&self, prev: &str, candidate: &str, next: &str) -> f64 {
        let left = self.language_model.bigram_log_prob(prev, candidate);
        let right = self.language_model.bigram_log_prob(candidate, next);
        0.5 * (left + right)
    }

    pub fn channel_score(&self, error: &str, candidate: &str) -> Result<f64, ChannelError> {
        self.channel.prob(error, candidate)
    }

    pub fn score(
        &self,
        error: &str,
        prev: &str,
        candidate: &str,
        next: &str,
    ) -> Result<f64, ChannelError> {
        let channel = self.channel_score(error, candidate)?;
        let unigram = self.language_model.unigram_log_prob(candidate);
        let context = self.bigram_score(prev, candidate, next) + unigram;
        Ok(self.weights.channel * channel + self.weights.language * context)
    }

    /// Score every candidate and sort best first.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(
        &self,
        error: &str,
        prev: &str,
        next: &str,
        candidates: &[String],
    ) -> Result<Vec<ScoredCandidate>, ChannelError> {
        let mut scored = candidates
            .iter()
            .map(|candidate| {
                Ok(ScoredCandidate {
                    word: candidate.clone(),
                    score: self.score(error, prev, candidate, next)?,
                })
            })
            .collect::<Result<Vec<_>, ChannelError>>()?;
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }
}
