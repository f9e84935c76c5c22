// Hard-EM training of the channel table
//
// Align every corpus pair under the current table, pool the aligned pairs
// into counts, re-estimate the table, and repeat until the pooled alignment
// stops changing.

use crate::alignment::{EditPair, align};
use crate::corpus::Corpus;
use crate::ChannelError;
use crate::cost::{CostModel, DEFAULT_PRIOR, EditCounts, check_prior};
use crate::model::ChannelModel;

/// Default ceiling on re-estimation rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Training options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerConfig {
    /// Stop after this many re-estimations even without convergence.
    pub max_iterations: usize,
    /// Additive prior for every count cell. Must be positive and finite.
    pub prior: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            prior: DEFAULT_PRIOR,
        }
    }
}

impl TrainerConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_prior(mut self, prior: f64) -> Self {
        self.prior = prior;
        self
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingReport {
    /// Number of re-estimations performed.
    pub iterations: usize,
    /// Whether the alignments reached a fixed point.
    pub converged: bool,
    /// Number of aligned pairs in the final pooled alignment.
    pub aligned_pairs: usize,
}

/// Drives re-estimation of a [`ChannelModel`] from a [`Corpus`].
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train `model` on `corpus`, replacing its table once per iteration.
    ///
    /// At least one re-estimation always happens. Training stops when two
    /// consecutive pooled alignments are identical or when
    /// `max_iterations` is reached. An invalid prior is rejected before the
    /// model is touched.
    pub fn train(
        &self,
        corpus: &Corpus,
        model: &ChannelModel,
    ) -> Result<TrainingReport, ChannelError> {
        let prior = check_prior(self.config.prior)?;
        let mut alignments = align_corpus(corpus, &model.snapshot());
        let mut iterations = 0;

        loop {
            if iterations >= self.config.max_iterations {
                log::warn!(
                    "training stopped after {iterations} iterations without converging"
                );
                return Ok(TrainingReport {
                    iterations,
                    converged: false,
                    aligned_pairs: alignments.len(),
                });
            }

            iterations += 1;
            model.replace(estimate(&alignments, prior)?);
            let next = align_corpus(corpus, &model.snapshot());
            log::debug!(
                "training iteration {iterations}: {} aligned pairs",
                next.len()
            );

            if next == alignments {
                log::info!("training converged after {iterations} iterations");
                return Ok(TrainingReport {
                    iterations,
                    converged: true,
                    aligned_pairs: next.len(),
                });
            }
            alignments = next;
        }
    }
}

/// Align every corpus pair and pool the aligned pairs in corpus order.
pub fn align_corpus(corpus: &Corpus, costs: &CostModel) -> Vec<EditPair> {
    corpus
        .pairs()
        .iter()
        .flat_map(|m| align(&m.observed, &m.intended, costs).pairs)
        .collect()
}

/// Re-estimate a table from pooled aligned pairs.
///
/// Transpositions are not counted; out-of-alphabet characters count
/// towards UNKNOWN.
pub fn estimate(alignments: &[EditPair], prior: f64) -> Result<CostModel, ChannelError> {
    let mut counts = EditCounts::new(check_prior(prior)?);
    for (intended, observed) in alignments.iter().filter_map(EditPair::channel_cell) {
        counts.add(intended, observed);
    }
    Ok(counts.into_model())
}
