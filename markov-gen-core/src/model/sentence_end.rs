use regex::Regex;

use crate::error::Result;

/// Terminal punctuation recognised by the default predicate.
pub const DEFAULT_TERMINATORS: &[char] = &['.', '!', '?'];

/// Rule deciding whether a token terminates a sentence.
#[derive(Debug, Clone)]
pub enum SentenceEnd {
	/// The last character of the token is one of the given characters.
	Suffix(Vec<char>),
	/// The whole token matches the regular expression.
	Pattern(Regex),
}

impl Default for SentenceEnd {
	fn default() -> Self {
		Self::Suffix(DEFAULT_TERMINATORS.to_vec())
	}
}

impl SentenceEnd {
	/// Compiles a whole-token pattern.
	///
	/// The expression is anchored at both ends, so `[.!?]` only matches tokens
	/// made of a single terminator and `.*[.!?]` behaves like the default.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidPattern` if the expression does not compile.
	pub fn pattern(pattern: &str) -> Result<Self> {
		Ok(Self::Pattern(Regex::new(&format!("^(?:{pattern})$"))?))
	}

	pub fn is_end(&self, token: &str) -> bool {
		match self {
			Self::Suffix(terminators) => token
				.chars()
				.next_back()
				.is_some_and(|last| terminators.contains(&last)),
			Self::Pattern(regex) => regex.is_match(token),
		}
	}
}
