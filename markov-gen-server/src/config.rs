use std::path::PathBuf;

use clap::Parser;
use markov_gen_core::{SentencePolicy, SuccessorPolicy};

/// Serves text generated from a word-level Markov chain.
#[derive(Debug, Parser)]
#[command(name = "markov-gen-server", version)]
pub struct ServerArgs {
	/// Corpus file (.csv uses the first column, anything else is read verbatim)
	#[arg(short, long, env = "MARKOV_CORPUS", value_name = "FILE")]
	pub corpus: PathBuf,

	#[arg(long, env = "MARKOV_HOST", default_value = "127.0.0.1")]
	pub host: String,

	#[arg(short, long, env = "MARKOV_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Largest sentence count a request may ask for
	#[arg(long, env = "MARKOV_MAX_SENTENCES", default_value_t = 10)]
	pub max_sentences: usize,

	/// Policy used when a request does not name one (single or restart)
	#[arg(long, env = "MARKOV_POLICY", default_value = "single")]
	pub policy: SentencePolicy,

	/// Store each successor once per token instead of once per observation
	#[arg(long)]
	pub distinct_successors: bool,

	/// Regular expression a whole token must match to end a sentence
	#[arg(long, value_name = "REGEX")]
	pub sentence_end: Option<String>,

	/// Generated texts kept for /v1/outputs
	#[arg(long, default_value_t = 1024)]
	pub store_capacity: usize,
}

impl ServerArgs {
	pub fn successor_policy(&self) -> SuccessorPolicy {
		if self.distinct_successors {
			SuccessorPolicy::Distinct
		} else {
			SuccessorPolicy::KeepDuplicates
		}
	}
}
