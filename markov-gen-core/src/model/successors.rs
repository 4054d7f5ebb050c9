use rand::Rng;

/// How repeated observations of the same transition are recorded.
///
/// The two policies produce different output distributions:
/// - `KeepDuplicates`: every observation is stored, so a successor seen
///   twice is sampled twice as often (frequency-weighted first-order model).
/// - `Distinct`: each successor is stored once per key, sampling is uniform
///   over the distinct successors regardless of how often they were seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessorPolicy {
	#[default]
	KeepDuplicates,
	Distinct,
}

/// Observed successors of a single token.
///
/// Conceptually a node of the Markov chain, its outgoing edges are the tokens
/// stored here. Order follows the corpus.
///
/// ## Invariants
/// - Every stored token immediately followed the owning key in the corpus
/// - With `SuccessorPolicy::Distinct`, no token is stored twice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Successors {
	tokens: Vec<String>,
}

impl Successors {
	/// Records one observation of `next` following the owning key.
	pub fn add(&mut self, next: &str, policy: SuccessorPolicy) {
		if policy == SuccessorPolicy::Distinct && self.tokens.iter().any(|t| t == next) {
			return;
		}
		self.tokens.push(next.to_owned());
	}

	/// Picks a successor uniformly over the stored list.
	///
	/// Duplicates count individually, so frequent transitions win more often.
	/// Returns `None` for an empty list.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.tokens.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.tokens.len());
		Some(self.tokens[index].as_str())
	}

	pub fn as_slice(&self) -> &[String] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}
