// Bounded breadth-first expansion of a word's edit neighborhood

use hashbrown::HashSet;

use super::generators::{EditGenerator, default_edit_generators};
use crate::language_model::Vocabulary;

/// Default number of expansion rounds.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Collects every in-vocabulary word within `max_distance` single edits.
///
/// Each round expands the words found in the previous round (the first
/// round expands the input word). Only in-vocabulary words are kept and
/// expanded further, so a correction is only reached through a chain of
/// known words.
pub struct CandidateGenerator {
    max_distance: usize,
    generators: Vec<Box<dyn EditGenerator + Send + Sync>>,
}

impl CandidateGenerator {
    pub fn new(max_distance: usize) -> Self {
        Self {
            max_distance,
            generators: default_edit_generators(),
        }
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Unique candidates in discovery order.
    ///
    /// Always runs `max_distance` rounds; rounds after the frontier empties
    /// find nothing. `word` itself is only returned when some other
    /// candidate leads back to it.
    pub fn generate(&self, word: &str, vocabulary: &dyn Vocabulary) -> Vec<String> {
        let mut found = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut expanded: HashSet<String> = HashSet::new();
        let mut frontier = vec![word.to_string()];

        for round in 1..=self.max_distance {
            let mut discovered = Vec::new();
            for current in &frontier {
                if !expanded.insert(current.clone()) {
                    continue;
                }
                let chars: Vec<char> = current.chars().collect();
                for generator in &self.generators {
                    generator.expand(&chars, vocabulary, &mut discovered);
                }
            }

            let mut next = Vec::new();
            for candidate in discovered {
                if seen.insert(candidate.clone()) {
                    found.push(candidate.clone());
                    next.push(candidate);
                }
            }
            log::debug!(
                "candidates for {word:?}: round {round} added {} (total {})",
                next.len(),
                found.len()
            );
            frontier = next;
        }

        found
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE)
    }
}
