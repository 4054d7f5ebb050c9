//! Word-level Markov chain text generation.
//!
//! This crate provides:
//! - Construction of a first-order transition table from raw text
//! - Random walks producing one or more sentences
//! - Corpus loading helpers (plain text, first CSV column)
//!
//! The two entry points are [`build_chain`] and [`generate_text`]. Finer
//! control (duplicate policy, start token, sentence end rule, seeded RNG)
//! lives in [`model`].

/// Transition table, builder and generator.
pub mod model;

/// Corpus loading (text blobs, CSV first column).
pub mod io;

/// Error type shared by the crate.
pub mod error;

pub use error::{MarkovError, Result};
pub use model::chain::{ChainBuilder, TransitionTable};
pub use model::generation_input::{GenerationInput, SentencePolicy, StartToken, validate_sentence_count};
pub use model::generator::Generator;
pub use model::sentence_end::SentenceEnd;
pub use model::successors::SuccessorPolicy;

/// Builds a transition table keeping duplicate successors.
pub fn build_chain(corpus: &str) -> TransitionTable {
	ChainBuilder::new().build(corpus)
}

/// Generates `sentence_count` sentences from a random capitalized start.
///
/// # Errors
/// - `MarkovError::EmptyTable` if `table` has no keys
/// - `MarkovError::InvalidSentenceCount` if `sentence_count` is zero
/// - `MarkovError::NoCapitalizedStartToken` if no key starts with an uppercase letter
pub fn generate_text(table: &TransitionTable, sentence_count: usize, policy: SentencePolicy) -> Result<String> {
	if table.is_empty() {
		return Err(MarkovError::EmptyTable);
	}
	let input = GenerationInput::new(sentence_count)?.with_policy(policy);
	Generator::new(table).generate(&input)
}
