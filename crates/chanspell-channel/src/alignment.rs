// Minimum-cost character alignment with transpositions
//
// Levenshtein-style dynamic programming over four operations. Rows of the
// table walk the observed word, columns walk the intended word. Each cell
// keeps the winning operation so the optimal path can be traced back.

use std::fmt;

use chanspell_core::character::lowercase_chars;
use chanspell_core::{BLANK_CHAR, Symbol};

use crate::cost::CostModel;

// ---------------------------------------------------------------------------
// Operations and aligned pairs
// ---------------------------------------------------------------------------

/// Edit operation stored in each table cell.
///
/// The declaration order is the tie-break order: when several operations
/// reach the same minimum, the first one listed wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// An intended character is missing from the observed word.
    Delete,
    /// One observed character stands for one intended character
    /// (a match when they are equal).
    Substitute,
    /// An observed character has no intended counterpart.
    Insert,
    /// Two adjacent characters appear swapped.
    Transpose,
}

impl Operation {
    /// How far `(i, j)` moves back when this operation is traced.
    #[inline]
    fn step(self) -> (usize, usize) {
        match self {
            Operation::Delete => (0, 1),
            Operation::Substitute => (1, 1),
            Operation::Insert => (1, 0),
            Operation::Transpose => (2, 2),
        }
    }
}

/// One step of an alignment: which observed characters were produced for
/// which intended characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditPair {
    Substitute { observed: char, intended: char },
    Insert { observed: char },
    Delete { intended: char },
    Transpose { observed: [char; 2], intended: [char; 2] },
}

impl EditPair {
    /// The `(intended, observed)` table cell this pair counts towards.
    ///
    /// `None` for transpositions, which are not part of the learned table.
    pub fn channel_cell(&self) -> Option<(Symbol, Symbol)> {
        match *self {
            EditPair::Substitute { observed, intended } => {
                Some((Symbol::from_char(intended), Symbol::from_char(observed)))
            }
            EditPair::Insert { observed } => Some((Symbol::BLANK, Symbol::from_char(observed))),
            EditPair::Delete { intended } => Some((Symbol::from_char(intended), Symbol::BLANK)),
            EditPair::Transpose { .. } => None,
        }
    }

    /// Whether this pair is a two-character swap.
    pub fn is_transposition(&self) -> bool {
        matches!(self, EditPair::Transpose { .. })
    }

    /// The observed side as text, `%` for a blank.
    pub fn observed_span(&self) -> String {
        match *self {
            EditPair::Substitute { observed, .. } | EditPair::Insert { observed } => {
                observed.to_string()
            }
            EditPair::Delete { .. } => BLANK_CHAR.to_string(),
            EditPair::Transpose { observed, .. } => observed.iter().collect(),
        }
    }

    /// The intended side as text, `%` for a blank.
    pub fn intended_span(&self) -> String {
        match *self {
            EditPair::Substitute { intended, .. } | EditPair::Delete { intended } => {
                intended.to_string()
            }
            EditPair::Insert { .. } => BLANK_CHAR.to_string(),
            EditPair::Transpose { intended, .. } => intended.iter().collect(),
        }
    }
}

/// Result of aligning an observed word against an intended word.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Total cost of the optimal path.
    pub cost: f64,
    /// The path, left to right.
    pub pairs: Vec<EditPair>,
}

impl fmt::Display for Alignment {
    /// Two rows of space-separated spans, observed above intended.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observed: Vec<String> = self.pairs.iter().map(EditPair::observed_span).collect();
        let intended: Vec<String> = self.pairs.iter().map(EditPair::intended_span).collect();
        writeln!(f, "Observed Word: {}", observed.join(" "))?;
        write!(f, "Intended Word: {}", intended.join(" "))
    }
}

// ---------------------------------------------------------------------------
// Alignment table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: f64,
    op: Operation,
}

/// The `(M+1) x (N+1)` dynamic-programming grid, row-major.
struct AlignmentTable {
    cols: usize,
    cells: Vec<Cell>,
}

impl AlignmentTable {
    fn build(observed: &[char], intended: &[char], costs: &CostModel) -> Self {
        let (m, n) = (observed.len(), intended.len());
        let mut table = Self {
            cols: n + 1,
            cells: vec![
                Cell {
                    cost: 0.0,
                    op: Operation::Delete,
                };
                (m + 1) * (n + 1)
            ],
        };

        for i in 1..=m {
            let cost = table.cost(i - 1, 0) + costs.insertion_cost(observed[i - 1]);
            table.set(
                i,
                0,
                Cell {
                    cost,
                    op: Operation::Insert,
                },
            );
        }
        for j in 1..=n {
            let cost = table.cost(0, j - 1) + costs.deletion_cost(intended[j - 1]);
            table.set(
                0,
                j,
                Cell {
                    cost,
                    op: Operation::Delete,
                },
            );
        }

        for i in 1..=m {
            for j in 1..=n {
                let del = table.cost(i, j - 1) + costs.deletion_cost(intended[j - 1]);
                let sub = table.cost(i - 1, j - 1)
                    + costs.substitution_cost(observed[i - 1], intended[j - 1]);
                let ins = table.cost(i - 1, j) + costs.insertion_cost(observed[i - 1]);
                let trans = if i > 1
                    && j > 1
                    && observed[i - 1] == intended[j - 2]
                    && observed[i - 2] == intended[j - 1]
                {
                    table.cost(i - 2, j - 2)
                        + costs.transposition_cost(observed[i - 2], observed[i - 1])
                } else {
                    f64::INFINITY
                };

                let mut best = Cell {
                    cost: del,
                    op: Operation::Delete,
                };
                for (cost, op) in [
                    (sub, Operation::Substitute),
                    (ins, Operation::Insert),
                    (trans, Operation::Transpose),
                ] {
                    if cost < best.cost {
                        best = Cell { cost, op };
                    }
                }
                table.set(i, j, best);
            }
        }
        table
    }

    #[inline]
    fn cost(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.cols + j].cost
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, cell: Cell) {
        self.cells[i * self.cols + j] = cell;
    }

    /// Follow the stored operations from `(M, N)` back to `(0, 0)`.
    fn backtrace(&self, observed: &[char], intended: &[char]) -> Vec<EditPair> {
        let (mut i, mut j) = (observed.len(), intended.len());
        let mut pairs = Vec::with_capacity(i.max(j));

        while i > 0 || j > 0 {
            let op = self.cells[i * self.cols + j].op;
            let (di, dj) = op.step();
            // Row 0 only stores Delete, column 0 only Insert, and Transpose
            // is only stored for i, j > 1, so neither index can underflow.
            assert!(
                di <= i && dj <= j,
                "backtrace left the table at ({i}, {j}) via {op:?}"
            );
            i -= di;
            j -= dj;
            pairs.push(match op {
                Operation::Delete => EditPair::Delete {
                    intended: intended[j],
                },
                Operation::Substitute => EditPair::Substitute {
                    observed: observed[i],
                    intended: intended[j],
                },
                Operation::Insert => EditPair::Insert {
                    observed: observed[i],
                },
                Operation::Transpose => EditPair::Transpose {
                    observed: [observed[i], observed[i + 1]],
                    intended: [intended[j], intended[j + 1]],
                },
            });
        }

        pairs.reverse();
        pairs
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Align `observed` against `intended` under `costs`.
///
/// Both words are lowercased first. The alignment is directional: the
/// cost of turning `intended` into `observed` is generally not the cost of
/// the reverse.
pub fn align(observed: &str, intended: &str, costs: &CostModel) -> Alignment {
    let observed = lowercase_chars(observed);
    let intended = lowercase_chars(intended);
    align_chars(&observed, &intended, costs)
}

/// [`align`] over already-lowercased character slices.
pub fn align_chars(observed: &[char], intended: &[char], costs: &CostModel) -> Alignment {
    let table = AlignmentTable::build(observed, intended, costs);
    let cost = table.cost(observed.len(), intended.len());
    let pairs = table.backtrace(observed, intended);
    Alignment { cost, pairs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanspell_core::SYMBOL_COUNT;

    use crate::cost::{DEFAULT_PRIOR, EditCounts, TRANSPOSITION_COST};

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c)
    }

    fn sub(observed: char, intended: char) -> EditPair {
        EditPair::Substitute { observed, intended }
    }

    /// Plain three-operation DP under the same costs.
    fn cost_without_transpositions(observed: &str, intended: &str, costs: &CostModel) -> f64 {
        let o: Vec<char> = observed.chars().collect();
        let n: Vec<char> = intended.chars().collect();
        let mut d = vec![vec![0.0; n.len() + 1]; o.len() + 1];
        for i in 1..=o.len() {
            d[i][0] = d[i - 1][0] + costs.insertion_cost(o[i - 1]);
        }
        for j in 1..=n.len() {
            d[0][j] = d[0][j - 1] + costs.deletion_cost(n[j - 1]);
        }
        for i in 1..=o.len() {
            for j in 1..=n.len() {
                let del = d[i][j - 1] + costs.deletion_cost(n[j - 1]);
                let ins = d[i - 1][j] + costs.insertion_cost(o[i - 1]);
                let sub = d[i - 1][j - 1] + costs.substitution_cost(o[i - 1], n[j - 1]);
                d[i][j] = del.min(ins).min(sub);
            }
        }
        d[o.len()][n.len()]
    }

    #[test]
    fn identical_words_align_for_free() {
        let costs = CostModel::untrained();
        for word in ["", "a", "aa", "spelling", "mississippi"] {
            let alignment = align(word, word, &costs);
            assert_eq!(alignment.cost, 0.0, "{word}");
            let expected: Vec<EditPair> = word
                .chars()
                .map(|c| EditPair::Substitute {
                    observed: c,
                    intended: c,
                })
                .collect();
            assert_eq!(alignment.pairs, expected);
        }
    }

    #[test]
    fn swapped_pair_is_a_transposition() {
        let costs = CostModel::untrained();
        let alignment = align("ab", "ba", &costs);
        assert_eq!(alignment.cost, 1.0);
        assert_eq!(
            alignment.pairs,
            vec![EditPair::Transpose {
                observed: ['a', 'b'],
                intended: ['b', 'a'],
            }]
        );
    }

    #[test]
    fn extra_character_is_an_insertion() {
        let costs = CostModel::untrained();
        let alignment = align("cart", "cat", &costs);
        assert_eq!(
            alignment.pairs,
            vec![
                sub('c', 'c'),
                sub('a', 'a'),
                EditPair::Insert { observed: 'r' },
                sub('t', 't'),
            ]
        );
        assert!((alignment.cost - costs.insertion_cost('r')).abs() < 1e-12);
    }

    #[test]
    fn missing_character_is_a_deletion() {
        let costs = CostModel::untrained();
        let alignment = align("ct", "cat", &costs);
        assert_eq!(alignment.pairs[1], EditPair::Delete { intended: 'a' });
        assert_eq!(alignment.pairs.len(), 3);
    }

    #[test]
    fn empty_sides_are_pure_indels() {
        let costs = CostModel::untrained();
        let alignment = align("ab", "", &costs);
        assert_eq!(
            alignment.pairs,
            vec![
                EditPair::Insert { observed: 'a' },
                EditPair::Insert { observed: 'b' },
            ]
        );
        let alignment = align("", "ab", &costs);
        assert_eq!(
            alignment.pairs,
            vec![
                EditPair::Delete { intended: 'a' },
                EditPair::Delete { intended: 'b' },
            ]
        );
    }

    #[test]
    fn ties_prefer_delete_over_substitute() {
        // At (1, 2) deleting the second 'a' and matching against the
        // first cost the same.
        let costs = CostModel::untrained();
        let alignment = align("a", "aa", &costs);
        assert_eq!(
            alignment.pairs,
            vec![
                sub('a', 'a'),
                EditPair::Delete { intended: 'a' },
            ]
        );
    }

    #[test]
    fn ties_prefer_substitute_over_insert() {
        // At (2, 1) matching the second 'a' and inserting it cost the same.
        let costs = CostModel::untrained();
        let alignment = align("aa", "a", &costs);
        assert_eq!(
            alignment.pairs,
            vec![
                EditPair::Insert { observed: 'a' },
                sub('a', 'a'),
            ]
        );
    }

    #[test]
    fn ties_prefer_substitute_over_transpose() {
        // P(b | a) = P(a | b) = 0.5, so two substitutions cost exactly the
        // flat transposition cost.
        let uniform = 1.0 / SYMBOL_COUNT as f64;
        let mut table = [[uniform; SYMBOL_COUNT]; SYMBOL_COUNT];
        for (intended, observed) in [('a', 'b'), ('b', 'a')] {
            let rest = 0.5 / (SYMBOL_COUNT - 1) as f64;
            table[sym(intended).index()] = [rest; SYMBOL_COUNT];
            table[sym(intended).index()][sym(observed).index()] = 0.5;
        }
        let costs = CostModel::from_table(table).unwrap();
        assert_eq!(costs.substitution_cost('a', 'b'), 0.5);
        assert_eq!(costs.substitution_cost('b', 'a'), 0.5);

        let alignment = align("ab", "ba", &costs);
        assert_eq!(alignment.cost, TRANSPOSITION_COST);
        assert_eq!(alignment.pairs, vec![sub('a', 'b'), sub('b', 'a')]);
    }

    #[test]
    fn input_is_lowercased() {
        let costs = CostModel::untrained();
        assert_eq!(align("HeLLo", "hello", &costs).cost, 0.0);
    }

    #[test]
    fn alignment_is_directional() {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        for _ in 0..50 {
            counts.add(sym('t'), Symbol::BLANK);
        }
        let costs = counts.into_model();
        // Dropping a 't' is cheap, adding one is not.
        let dropped = align("ca", "cat", &costs).cost;
        let added = align("cat", "ca", &costs).cost;
        assert!(dropped < added, "{dropped} vs {added}");
    }

    #[test]
    fn transpositions_never_increase_cost() {
        let mut counts = EditCounts::new(DEFAULT_PRIOR);
        for _ in 0..20 {
            counts.add(sym('e'), sym('i'));
            counts.add(sym('i'), sym('e'));
            counts.add(Symbol::BLANK, sym('s'));
        }
        let trained = counts.into_model();
        let pairs = [
            ("thier", "their"),
            ("recieve", "receive"),
            ("teh", "the"),
            ("acress", "across"),
            ("abcdef", "badcfe"),
            ("", "xyz"),
            ("form", "from"),
        ];
        for costs in [CostModel::untrained(), trained] {
            for (observed, intended) in pairs {
                let with = align(observed, intended, &costs).cost;
                let without = cost_without_transpositions(observed, intended, &costs);
                assert!(with <= without + 1e-12, "{observed}/{intended}: {with} > {without}");
            }
        }
    }

    #[test]
    fn path_cost_matches_table_cost() {
        let costs = CostModel::untrained();
        let alignment = align("acress", "across", &costs);
        let summed: f64 = alignment
            .pairs
            .iter()
            .map(|pair| match *pair {
                EditPair::Substitute { observed, intended } => {
                    costs.substitution_cost(observed, intended)
                }
                EditPair::Insert { observed } => costs.insertion_cost(observed),
                EditPair::Delete { intended } => costs.deletion_cost(intended),
                EditPair::Transpose { observed, .. } => {
                    costs.transposition_cost(observed[0], observed[1])
                }
            })
            .sum();
        assert!((summed - alignment.cost).abs() < 1e-9);
    }

    #[test]
    fn spans_and_cells() {
        let pair = EditPair::Insert { observed: 'x' };
        assert_eq!(pair.observed_span(), "x");
        assert_eq!(pair.intended_span(), "%");
        assert_eq!(pair.channel_cell(), Some((Symbol::BLANK, sym('x'))));

        let pair = EditPair::Delete { intended: 'y' };
        assert_eq!(pair.channel_cell(), Some((sym('y'), Symbol::BLANK)));

        let pair = EditPair::Transpose {
            observed: ['i', 'e'],
            intended: ['e', 'i'],
        };
        assert_eq!(pair.observed_span(), "ie");
        assert_eq!(pair.intended_span(), "ei");
        assert!(pair.is_transposition());
        assert_eq!(pair.channel_cell(), None);
    }

    #[test]
    fn display_shows_both_rows() {
        let costs = CostModel::untrained();
        let shown = align("cart", "cat", &costs).to_string();
        assert_eq!(shown, "Observed Word: c a r t\nIntended Word: c a % t");
    }
}
