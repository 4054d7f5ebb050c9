use std::path::PathBuf;

use clap::Parser;
use markov_gen_core::{SentencePolicy, SuccessorPolicy};

/// Generates text from a word-level Markov chain built from a corpus.
#[derive(Debug, Parser)]
#[command(name = "markov-gen", version)]
pub struct CliArgs {
	/// Corpus file (.csv uses the first column, anything else is read verbatim)
	#[arg(short, long, env = "MARKOV_CORPUS", value_name = "FILE", default_value = "input.csv")]
	pub corpus: PathBuf,

	/// Sentences per generated text
	#[arg(short, long, default_value_t = 1)]
	pub sentences: usize,

	/// Largest accepted value for --sentences
	#[arg(long, env = "MARKOV_MAX_SENTENCES", default_value_t = 10)]
	pub max_sentences: usize,

	/// Number of texts to generate
	#[arg(short = 'n', long, default_value_t = 1)]
	pub count: usize,

	/// How several sentences are chained (single or restart)
	#[arg(long, env = "MARKOV_POLICY", default_value = "single")]
	pub policy: SentencePolicy,

	/// First token instead of a random capitalized one
	#[arg(long, value_name = "TOKEN")]
	pub start: Option<String>,

	/// Store each successor once per token instead of once per observation
	#[arg(long)]
	pub distinct_successors: bool,

	/// Regular expression a whole token must match to end a sentence
	#[arg(long, value_name = "REGEX")]
	pub sentence_end: Option<String>,

	/// Incoming webhook receiving every generated text
	#[arg(long, env = "MARKOV_WEBHOOK_URL", value_name = "URL")]
	pub webhook_url: Option<String>,

	#[arg(long, default_value = "Markov")]
	pub webhook_username: String,

	#[arg(long, default_value = ":shipit:")]
	pub webhook_icon: String,
}

impl CliArgs {
	pub fn successor_policy(&self) -> SuccessorPolicy {
		if self.distinct_successors {
			SuccessorPolicy::Distinct
		} else {
			SuccessorPolicy::KeepDuplicates
		}
	}
}
