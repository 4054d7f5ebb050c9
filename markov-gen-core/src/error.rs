use thiserror::Error;

/// Errors returned by chain construction helpers, generation and corpus loading.
///
/// Walking a chain never fails: a dead-end simply truncates the output.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The transition table has no keys, nothing can be generated from it.
	#[error("transition table is empty")]
	EmptyTable,

	/// No key of the transition table starts with an uppercase letter.
	#[error("no capitalized start token in transition table")]
	NoCapitalizedStartToken,

	/// Requested number of sentences is zero or above the caller's maximum.
	#[error("invalid sentence count {requested}{}", describe_max(.max))]
	InvalidSentenceCount { requested: usize, max: Option<usize> },

	/// A caller supplied start token that is not a key of the table.
	#[error("unknown start token '{0}'")]
	UnknownStartToken(String),

	/// Textual sentence policy could not be parsed.
	#[error("invalid sentence policy '{0}', expected 'single' or 'restart'")]
	InvalidPolicy(String),

	/// Textual start token could not be parsed.
	#[error("invalid start token '{0}', expected 'random' or 'custom:<token>'")]
	InvalidStartToken(String),

	#[error("invalid sentence end pattern: {0}")]
	InvalidPattern(#[from] regex::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

fn describe_max(max: &Option<usize>) -> String {
	match max {
		Some(max) => format!(", expected 1..={max}"),
		None => ", expected at least 1".to_owned(),
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MarkovError>;
