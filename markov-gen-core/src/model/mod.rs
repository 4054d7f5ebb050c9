//! Word-level Markov chain model.
//!
//! - Transition table and its builder (`chain`)
//! - Successor lists with frequency-weighted sampling (`successors`)
//! - Sentence end detection (`sentence_end`)
//! - Generation parameters (`generation_input`)
//! - The walking `Generator`

/// Transition table (token → observed successors) and `ChainBuilder`.
///
/// Tables are immutable once built and index their capitalized keys
/// for start selection.
pub mod chain;

/// Random walk over a transition table.
///
/// Start selection, bounded sentence walks and multi-sentence policies.
pub mod generator;

/// Generation parameters: sentence count, multi-sentence policy, start token.
pub mod generation_input;

/// Sentence end predicate (terminal punctuation or a regular expression).
pub mod sentence_end;

/// Successors of one token and the duplicate policy.
pub mod successors;
