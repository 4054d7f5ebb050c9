use std::fmt;
use std::str::FromStr;

use crate::error::{MarkovError, Result};

/// How several sentences are produced in one generation call.
///
/// The two policies are not equivalent:
/// - `SingleWalk`: one contiguous walk that stops after the n-th sentence end,
///   producing a single continuous excerpt.
/// - `RestartPerSentence`: n independent one-sentence walks, each from a fresh
///   random capitalized start, joined with a space. Sentences may be unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentencePolicy {
	#[default]
	SingleWalk,
	RestartPerSentence,
}

impl FromStr for SentencePolicy {
	type Err = MarkovError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_lowercase().as_str() {
			"single" | "single-walk" => Ok(Self::SingleWalk),
			"restart" | "restart-per-sentence" => Ok(Self::RestartPerSentence),
			_ => Err(MarkovError::InvalidPolicy(s.to_owned())),
		}
	}
}

impl fmt::Display for SentencePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::SingleWalk => write!(f, "single"),
			Self::RestartPerSentence => write!(f, "restart"),
		}
	}
}

/// Strategy used to select the first token of a generation.
///
/// # Variants
/// - `RandomCapitalized`: a uniformly random key starting with an uppercase letter.
/// - `Custom(&str)`: the given token, which must be a key of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartToken<'a> {
	#[default]
	RandomCapitalized,
	Custom(&'a str),
}

impl<'a> StartToken<'a> {
	/// Parses `random` or `custom:<token>` (prefix is case-insensitive).
	///
	/// # Errors
	/// Returns `MarkovError::InvalidStartToken` for any other form or an empty custom token.
	pub fn parse(s: &'a str) -> Result<Self> {
		if s.eq_ignore_ascii_case("random") {
			return Ok(Self::RandomCapitalized);
		}
		match s.get(.."custom:".len()) {
			Some(prefix) if prefix.eq_ignore_ascii_case("custom:") => {
				let value = &s["custom:".len()..];
				if value.is_empty() {
					Err(MarkovError::InvalidStartToken(s.to_owned()))
				} else {
					Ok(Self::Custom(value))
				}
			}
			_ => Err(MarkovError::InvalidStartToken(s.to_owned())),
		}
	}
}

/// Parameters of one generation call.
///
/// # Invariants
/// - `sentence_count` is never zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationInput<'a> {
	sentence_count: usize,

	/// How multiple sentences are chained.
	pub policy: SentencePolicy,

	/// Where the walk starts.
	pub start: StartToken<'a>,
}

impl Default for GenerationInput<'_> {
	fn default() -> Self {
		Self {
			sentence_count: 1,
			policy: SentencePolicy::default(),
			start: StartToken::default(),
		}
	}
}

impl<'a> GenerationInput<'a> {
	/// Input for `sentence_count` sentences with the default policy and a random start.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidSentenceCount` if `sentence_count` is zero.
	pub fn new(sentence_count: usize) -> Result<Self> {
		let mut input = Self::default();
		input.set_sentence_count(sentence_count)?;
		Ok(input)
	}

	pub fn with_policy(mut self, policy: SentencePolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn with_start(mut self, start: StartToken<'a>) -> Self {
		self.start = start;
		self
	}

	pub fn sentence_count(&self) -> usize {
		self.sentence_count
	}

	/// # Errors
	/// Returns `MarkovError::InvalidSentenceCount` if `sentence_count` is zero.
	pub fn set_sentence_count(&mut self, sentence_count: usize) -> Result<()> {
		if sentence_count == 0 {
			return Err(MarkovError::InvalidSentenceCount { requested: 0, max: None });
		}
		self.sentence_count = sentence_count;
		Ok(())
	}
}

/// Checks a requested sentence count against a caller-configured maximum.
///
/// Meant for request boundaries (HTTP handler, CLI arguments); the generator
/// itself only rejects zero.
pub fn validate_sentence_count(requested: usize, max: usize) -> Result<usize> {
	if requested == 0 || requested > max {
		return Err(MarkovError::InvalidSentenceCount { requested, max: Some(max) });
	}
	Ok(requested)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_policies() {
		assert_eq!("single".parse::<SentencePolicy>().unwrap(), SentencePolicy::SingleWalk);
		assert_eq!("Restart".parse::<SentencePolicy>().unwrap(), SentencePolicy::RestartPerSentence);
		assert!(matches!("both".parse::<SentencePolicy>(), Err(MarkovError::InvalidPolicy(_))));
	}

	#[test]
	fn policy_display_parses_back() {
		for policy in [SentencePolicy::SingleWalk, SentencePolicy::RestartPerSentence] {
			assert_eq!(policy.to_string().parse::<SentencePolicy>().unwrap(), policy);
		}
	}

	#[test]
	fn parses_start_tokens() {
		assert_eq!(StartToken::parse("random").unwrap(), StartToken::RandomCapitalized);
		assert_eq!(StartToken::parse("RANDOM").unwrap(), StartToken::RandomCapitalized);
		assert_eq!(StartToken::parse("custom:The").unwrap(), StartToken::Custom("The"));
		assert_eq!(StartToken::parse("Custom:end.").unwrap(), StartToken::Custom("end."));
	}

	#[test]
	fn rejects_malformed_start_tokens() {
		for input in ["", "custom:", "fixed:The", "cust", "é"] {
			assert!(
				matches!(StartToken::parse(input), Err(MarkovError::InvalidStartToken(_))),
				"'{input}' should be rejected"
			);
		}
	}

	#[test]
	fn zero_sentences_is_rejected() {
		assert!(matches!(
			GenerationInput::new(0),
			Err(MarkovError::InvalidSentenceCount { requested: 0, max: None })
		));
		let mut input = GenerationInput::default();
		assert!(input.set_sentence_count(0).is_err());
		assert_eq!(input.sentence_count(), 1);
	}

	#[test]
	fn builder_sets_fields() {
		let input = GenerationInput::new(3)
			.unwrap()
			.with_policy(SentencePolicy::RestartPerSentence)
			.with_start(StartToken::Custom("As"));
		assert_eq!(input.sentence_count(), 3);
		assert_eq!(input.policy, SentencePolicy::RestartPerSentence);
		assert_eq!(input.start, StartToken::Custom("As"));
	}

	#[test]
	fn validates_against_maximum() {
		assert_eq!(validate_sentence_count(1, 10).unwrap(), 1);
		assert_eq!(validate_sentence_count(10, 10).unwrap(), 10);
		assert!(matches!(
			validate_sentence_count(11, 10),
			Err(MarkovError::InvalidSentenceCount { requested: 11, max: Some(10) })
		));
		assert!(validate_sentence_count(0, 10).is_err());
	}
}
