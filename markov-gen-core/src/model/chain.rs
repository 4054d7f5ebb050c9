use std::collections::HashMap;

use rand::Rng;

use super::successors::{SuccessorPolicy, Successors};

/// Characters stripped from both ends of every token.
const TRIMMED: &[char] = &[' ', '\t', '\n'];

/// First-order word Markov chain.
///
/// Maps every token that appeared in a non-final position of the corpus to
/// the tokens observed right after it. The table is immutable once built and
/// can be shared between threads for concurrent generation.
///
/// Keys whose first character is uppercase are indexed at build time, so
/// picking a sentence start is a single draw.
///
/// # Invariants
/// - Every key has at least one successor
/// - `start_tokens` holds exactly the capitalized keys, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionTable {
	transitions: HashMap<String, Successors>,
	start_tokens: Vec<String>,
}

impl TransitionTable {
	/// Successors recorded for `token`, empty if the token is not a key.
	pub fn successors(&self, token: &str) -> &[String] {
		self.transitions
			.get(token)
			.map(Successors::as_slice)
			.unwrap_or_default()
	}

	/// Picks a successor of `token`, `None` on a dead-end.
	pub fn next_token<R: Rng + ?Sized>(&self, token: &str, rng: &mut R) -> Option<&str> {
		self.transitions.get(token)?.pick(rng)
	}

	pub fn contains(&self, token: &str) -> bool {
		self.transitions.contains_key(token)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.transitions.keys().map(String::as_str)
	}

	/// Keys usable as a sentence start (first character uppercase).
	pub fn start_tokens(&self) -> &[String] {
		&self.start_tokens
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Total number of stored transitions, duplicates included.
	pub fn transition_count(&self) -> usize {
		self.transitions.values().map(Successors::len).sum()
	}

	fn record(&mut self, token: &str, next: &str, policy: SuccessorPolicy) {
		if !self.transitions.contains_key(token) && starts_capitalized(token) {
			self.start_tokens.push(token.to_owned());
		}
		self.transitions
			.entry(token.to_owned())
			.or_default()
			.add(next, policy);
	}
}

/// Whether the first character of `token` is an uppercase letter.
///
/// Uses Unicode case classification, so `"Élan"` qualifies.
pub fn starts_capitalized(token: &str) -> bool {
	token.chars().next().is_some_and(char::is_uppercase)
}

/// Builds a `TransitionTable` from raw corpus text.
///
/// # Example
/// ```
/// use markov_gen_core::model::chain::ChainBuilder;
///
/// let table = ChainBuilder::new().build("As a user I want.");
/// assert_eq!(table.successors("I"), ["want."]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainBuilder {
	policy: SuccessorPolicy,
}

impl ChainBuilder {
	/// Builder keeping duplicate successors (frequency-weighted sampling).
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_policy(mut self, policy: SuccessorPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn policy(&self) -> SuccessorPolicy {
		self.policy
	}

	/// Tokenizes `text` on whitespace and records every adjacent pair.
	///
	/// # Notes
	/// - Punctuation stays attached to its token (`"want."`).
	/// - The last token only becomes a key if it also appears earlier.
	/// - Empty or single-token input yields an empty table.
	pub fn build(&self, text: &str) -> TransitionTable {
		let tokens: Vec<&str> = text
			.split_whitespace()
			.map(|token| token.trim_matches(TRIMMED))
			.collect();

		let mut table = TransitionTable::default();
		for pair in tokens.windows(2) {
			table.record(pair[0], pair[1], self.policy);
		}

		log::debug!(
			"built chain from {} tokens: {} keys, {} transitions, {} start tokens",
			tokens.len(),
			table.len(),
			table.transition_count(),
			table.start_tokens.len()
		);
		table
	}
}
