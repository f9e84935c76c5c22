// Suggestion generation for non-words
//
// Architecture:
//   - `generators`: single-edit generators (EditGenerator trait)
//   - `candidates`: bounded breadth-first search over in-vocabulary edits
//   - `ranker`: channel + language-model scoring and stable ordering

pub mod candidates;
pub mod generators;
pub mod ranker;

pub use candidates::{CandidateGenerator, DEFAULT_MAX_DISTANCE};
pub use generators::{EditGenerator, default_edit_generators};
pub use ranker::{CandidateRanker, RankWeights, ScoredCandidate};
