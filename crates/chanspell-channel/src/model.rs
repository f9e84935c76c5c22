// Shared channel model: an atomically replaceable cost table plus the
// channel log-likelihood used for ranking.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ChannelError;
use crate::alignment::{Alignment, EditPair, align};
use crate::cost::CostModel;
use crate::snapshot::CostSnapshot;

/// Log-probability charged for every transposition in an alignment.
pub const TRANSPOSITION_LOG_PROB: f64 = -3.0;

/// Holds the current [`CostModel`] as an immutable snapshot.
///
/// Readers take an `Arc` to the table in effect when they start and keep
/// using it even if training swaps in a new one meanwhile. Writers replace
/// the whole table at once, so no reader ever sees a half-updated table.
#[derive(Debug)]
pub struct ChannelModel {
    costs: RwLock<Arc<CostModel>>,
}

impl ChannelModel {
    /// A model holding the untrained (uniform) table.
    pub fn new() -> Self {
        Self::from_costs(CostModel::untrained())
    }

    pub fn from_costs(costs: CostModel) -> Self {
        Self {
            costs: RwLock::new(Arc::new(costs)),
        }
    }

    /// The table currently in effect.
    pub fn snapshot(&self) -> Arc<CostModel> {
        // The lock only guards a pointer swap, so a poisoned lock still
        // holds a complete table.
        let guard = self.costs.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new table.
    pub fn replace(&self, costs: CostModel) {
        let costs = Arc::new(costs);
        let mut guard = self.costs.write().unwrap_or_else(PoisonError::into_inner);
        *guard = costs;
    }

    /// Align `observed` against `intended` under the current table.
    pub fn align(&self, observed: &str, intended: &str) -> Alignment {
        align(observed, intended, &self.snapshot())
    }

    /// Channel log-likelihood that `observed` was typed for `intended`.
    ///
    /// Sums `ln P(observed | intended)` over the optimal alignment, with a
    /// flat [`TRANSPOSITION_LOG_PROB`] per transposition.
    pub fn prob(&self, observed: &str, intended: &str) -> Result<f64, ChannelError> {
        let costs = self.snapshot();
        let alignment = align(observed, intended, &costs);
        log_likelihood(&alignment.pairs, &costs)
    }

    /// Write the current table as a JSON snapshot.
    ///
    /// The file is written next to `path` first and renamed into place.
    /// On failure the temporary file is removed and `path` is untouched.
    pub fn save(&self, path: &Path) -> Result<(), ChannelError> {
        let tmp = path.with_extension("tmp");
        let written = self
            .write_snapshot(&tmp)
            .and_then(|()| fs::rename(&tmp, path).map_err(ChannelError::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        log::debug!("saved channel model to {}", path.display());
        Ok(())
    }

    fn write_snapshot(&self, path: &Path) -> Result<(), ChannelError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.snapshot().to_snapshot().write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a model from a JSON snapshot file.
    pub fn load(path: &Path) -> Result<Self, ChannelError> {
        let reader = BufReader::new(File::open(path)?);
        let snapshot = CostSnapshot::read_json(reader)?;
        let costs = CostModel::from_snapshot(&snapshot)?;
        log::debug!("loaded channel model from {}", path.display());
        Ok(Self::from_costs(costs))
    }
}

impl Default for ChannelModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum of per-pair log-probabilities for an alignment.
pub fn log_likelihood(pairs: &[EditPair], costs: &CostModel) -> Result<f64, ChannelError> {
    let mut total = 0.0;
    for pair in pairs {
        total += match pair.channel_cell() {
            Some((intended, observed)) => costs.log_probability(intended, observed)?,
            None => TRANSPOSITION_LOG_PROB,
        };
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanspell_core::{SYMBOL_COUNT, Symbol};

    #[test]
    fn untrained_prob_counts_every_pair() {
        let model = ChannelModel::new();
        let uniform = (1.0 / SYMBOL_COUNT as f64).ln();
        let p = model.prob("cat", "cat").unwrap();
        assert!((p - 3.0 * uniform).abs() < 1e-9);
    }

    #[test]
    fn transposition_costs_a_flat_log_prob() {
        let model = ChannelModel::new();
        let uniform = (1.0 / SYMBOL_COUNT as f64).ln();
        // "teh" vs "the": t matches, "eh" is a swap of "he".
        let p = model.prob("teh", "the").unwrap();
        assert!((p - (uniform + TRANSPOSITION_LOG_PROB)).abs() < 1e-9);
    }

    #[test]
    fn replace_is_seen_by_new_readers_only() {
        let model = ChannelModel::new();
        let before = model.snapshot();

        let mut counts = crate::cost::EditCounts::new(0.1);
        counts.add(Symbol::from_char('a'), Symbol::from_char('a'));
        model.replace(counts.into_model());

        let after = model.snapshot();
        let a = Symbol::from_char('a');
        assert!(after.probability(a, a) > before.probability(a, a));
        assert_eq!(*before, CostModel::untrained());
    }

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChannelModel>();
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = std::env::temp_dir().join(format!("chanspell-model-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.json");

        let model = ChannelModel::new();
        model.save(&path).unwrap();
        let loaded = ChannelModel::load(&path).unwrap();
        let a = Symbol::from_char('a');
        assert!(
            (loaded.snapshot().probability(a, Symbol::BLANK)
                - model.snapshot().probability(a, Symbol::BLANK))
            .abs()
                < 1e-12
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_save_removes_the_temporary_file() {
        let dir = std::env::temp_dir().join(format!("chanspell-save-{}", std::process::id()));
        // A directory where the model file should go makes the rename fail.
        let path = dir.join("model.json");
        fs::create_dir_all(&path).unwrap();

        let err = ChannelModel::new().save(&path).unwrap_err();
        assert!(matches!(err, ChannelError::Io(_)));
        assert!(!dir.join("model.tmp").exists());
        assert!(path.is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }
}
