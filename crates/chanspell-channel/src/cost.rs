// Channel probability table and the edit costs derived from it

use std::fmt;

use chanspell_core::{SYMBOL_COUNT, Symbol};

use crate::ChannelError;

/// Additive prior added to every count cell before normalizing.
pub const DEFAULT_PRIOR: f64 = 0.1;

/// Flat cost of swapping two adjacent characters.
///
/// Not learned. It is slightly above the cost of any single learned edit,
/// so a transposition only wins when nothing cheaper explains the pair.
pub const TRANSPOSITION_COST: f64 = 1.0;

/// Tolerance used when checking that a row sums to one.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Accept `prior` only if it is positive and finite.
///
/// Any other prior yields zero, negative or `NaN` cells once a row is
/// normalized.
pub fn check_prior(prior: f64) -> Result<f64, ChannelError> {
    if prior.is_finite() && prior > 0.0 {
        Ok(prior)
    } else {
        Err(ChannelError::InvalidPrior(prior))
    }
}

/// Raw `[intended][observed]` probability table.
pub type Table = [[f64; SYMBOL_COUNT]; SYMBOL_COUNT];

// ---------------------------------------------------------------------------
// CostModel
// ---------------------------------------------------------------------------

/// Conditional probabilities `P(observed | intended)` over the closed
/// symbol alphabet, indexed `[intended][observed]`.
///
/// Every cell is strictly positive and every row sums to one. A table is
/// never edited after construction: training builds a fresh one each
/// iteration.
#[derive(Clone, PartialEq)]
pub struct CostModel {
    probs: Table,
}

impl CostModel {
    /// The model before any training: the estimate from an empty set of
    /// alignments, i.e. uniform `1 / SYMBOL_COUNT` in every cell.
    pub fn untrained() -> Self {
        EditCounts::new(DEFAULT_PRIOR).into_model()
    }

    /// Build a model from a raw table, checking the table invariants.
    pub fn from_table(probs: Table) -> Result<Self, ChannelError> {
        let model = Self { probs };
        model.validate().map_err(ChannelError::InvalidSnapshot)?;
        Ok(model)
    }

    /// Check that every cell is in `(0, 1]` and every row sums to one.
    pub fn validate(&self) -> Result<(), String> {
        for intended in Symbol::all() {
            let row = self.row(intended);
            for observed in Symbol::all() {
                let p = row[observed.index()];
                if !(p.is_finite() && p > 0.0 && p <= 1.0) {
                    return Err(format!(
                        "P({observed} | {intended}) = {p} is not a probability"
                    ));
                }
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(format!("row {intended} sums to {sum}"));
            }
        }
        Ok(())
    }

    /// `P(observed | intended)`.
    #[inline]
    pub fn probability(&self, intended: Symbol, observed: Symbol) -> f64 {
        self.probs[intended.index()][observed.index()]
    }

    /// Natural log of `P(observed | intended)`.
    ///
    /// Fails if the cell is not a positive finite probability, which would
    /// otherwise turn into `-inf` or `NaN` and silently poison a ranking.
    pub fn log_probability(&self, intended: Symbol, observed: Symbol) -> Result<f64, ChannelError> {
        let probability = self.probability(intended, observed);
        if probability.is_finite() && probability > 0.0 {
            Ok(probability.ln())
        } else {
            Err(ChannelError::ProbabilityLookup {
                intended,
                observed,
                probability,
            })
        }
    }

    /// All observed-symbol probabilities for one intended symbol.
    pub fn row(&self, intended: Symbol) -> &[f64; SYMBOL_COUNT] {
        &self.probs[intended.index()]
    }

    /// Cost of dropping a character that should have appeared:
    /// `1 - P(BLANK | intended)`.
    #[inline]
    pub fn deletion_cost(&self, intended: char) -> f64 {
        1.0 - self.probability(Symbol::from_char(intended), Symbol::BLANK)
    }

    /// Cost of an extraneous character: `1 - P(observed | BLANK)`.
    #[inline]
    pub fn insertion_cost(&self, observed: char) -> f64 {
        1.0 - self.probability(Symbol::BLANK, Symbol::from_char(observed))
    }

    /// Cost of typing `observed` for `intended`; zero when both map to the
    /// same symbol (including two different out-of-alphabet characters).
    #[inline]
    pub fn substitution_cost(&self, observed: char, intended: char) -> f64 {
        let observed = Symbol::from_char(observed);
        let intended = Symbol::from_char(intended);
        if observed == intended {
            0.0
        } else {
            1.0 - self.probability(intended, observed)
        }
    }

    /// Cost of swapping an adjacent pair. Flat for every pair.
    #[inline]
    pub fn transposition_cost(&self, _first: char, _second: char) -> f64 {
        TRANSPOSITION_COST
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::untrained()
    }
}

impl fmt::Debug for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blank = self.row(Symbol::BLANK);
        f.debug_struct("CostModel")
            .field("symbols", &SYMBOL_COUNT)
            .field("p_blank_a", &blank[Symbol::from_char('a').index()])
            .field("p_e_e", &self.probability(Symbol::from_char('e'), Symbol::from_char('e')))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// EditCounts
// ---------------------------------------------------------------------------

/// Smoothed co-occurrence counts `counts[intended][observed]`, the
/// intermediate step between a pooled alignment and a new [`CostModel`].
#[derive(Debug, Clone)]
pub struct EditCounts {
    counts: Table,
}

impl EditCounts {
    /// Start every cell at `prior`.
    pub fn new(prior: f64) -> Self {
        Self {
            counts: [[prior; SYMBOL_COUNT]; SYMBOL_COUNT],
        }
    }

    /// Count one aligned `(observed, intended)` pair.
    #[inline]
    pub fn add(&mut self, intended: Symbol, observed: Symbol) {
        self.counts[intended.index()][observed.index()] += 1.0;
    }

    /// Current count of a cell.
    pub fn count(&self, intended: Symbol, observed: Symbol) -> f64 {
        self.counts[intended.index()][observed.index()]
    }

    /// Normalize each row into a probability distribution.
    pub fn into_model(self) -> CostModel {
        let mut probs = self.counts;
        for row in &mut probs {
            let total: f64 = row.iter().sum();
            for cell in row.iter_mut() {
                *cell /= total;
            }
        }
        CostModel { probs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c)
    }

    #[test]
    fn untrained_model_is_uniform() {
        let model = CostModel::untrained();
        let expected = 1.0 / SYMBOL_COUNT as f64;
        for intended in Symbol::all() {
            for observed in Symbol::all() {
                assert!((model.probability(intended, observed) - expected).abs() < 1e-12);
            }
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn identical_characters_substitute_for_free() {
        let model = CostModel::untrained();
        assert_eq!(model.substitution_cost('a', 'a'), 0.0);
        assert_eq!(model.substitution_cost('A', 'a'), 0.0);
        // Both map to UNKNOWN.
        assert_eq!(model.substitution_cost('1', '2'), 0.0);
        assert!(model.substitution_cost('a', 'b') > 0.0);
    }

    #[test]
    fn costs_follow_counts() {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        for _ in 0..10 {
            counts.add(sym('e'), sym('a'));
            counts.add(sym('t'), Symbol::BLANK);
            counts.add(Symbol::BLANK, sym('x'));
        }
        let model = counts.into_model();
        assert!(model.substitution_cost('a', 'e') < model.substitution_cost('b', 'e'));
        assert!(model.deletion_cost('t') < model.deletion_cost('s'));
        assert!(model.insertion_cost('x') < model.insertion_cost('y'));
    }

    #[test]
    fn costs_stay_within_unit_interval() {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        for _ in 0..1000 {
            counts.add(sym('q'), sym('q'));
        }
        let model = counts.into_model();
        for c in ['a', 'q', '#'] {
            for d in ['b', 'q', '!'] {
                let cost = model.substitution_cost(c, d);
                assert!((0.0..=1.0).contains(&cost));
            }
            assert!((0.0..=1.0).contains(&model.deletion_cost(c)));
            assert!((0.0..=1.0).contains(&model.insertion_cost(c)));
        }
        assert_eq!(model.transposition_cost('a', 'b'), TRANSPOSITION_COST);
    }

    #[test]
    fn normalized_rows_sum_to_one() {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        counts.add(sym('a'), sym('b'));
        counts.add(sym('a'), Symbol::UNKNOWN);
        let model = counts.into_model();
        for intended in Symbol::all() {
            let sum: f64 = model.row(intended).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_cell_fails_validation_and_lookup() {
        let mut table = [[1.0 / SYMBOL_COUNT as f64; SYMBOL_COUNT]; SYMBOL_COUNT];
        table[0][1] = 0.0;
        assert!(matches!(
            CostModel::from_table(table),
            Err(ChannelError::InvalidSnapshot(_))
        ));

        let broken = CostModel { probs: table };
        let err = broken.log_probability(sym('a'), sym('b')).unwrap_err();
        assert!(matches!(err, ChannelError::ProbabilityLookup { .. }));
        assert!(broken.log_probability(sym('a'), sym('a')).is_ok());
    }

    #[test]
    fn prior_must_be_positive_and_finite() {
        assert_eq!(check_prior(DEFAULT_PRIOR).unwrap(), DEFAULT_PRIOR);
        for prior in [0.0, -0.05, f64::INFINITY, f64::NAN] {
            assert!(matches!(check_prior(prior), Err(ChannelError::InvalidPrior(_))));
        }
    }

    #[test]
    fn unnormalized_row_fails_validation() {
        let mut table = [[1.0 / SYMBOL_COUNT as f64; SYMBOL_COUNT]; SYMBOL_COUNT];
        table[3][3] = 0.5;
        assert!(CostModel::from_table(table).is_err());
    }
}
