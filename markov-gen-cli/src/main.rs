use anyhow::Context;
use clap::Parser;

use markov_gen_core::io::load_corpus;
use markov_gen_core::{validate_sentence_count, ChainBuilder, GenerationInput, Generator, SentenceEnd, StartToken};

mod config;
mod notify;

use config::CliArgs;
use notify::WebhookNotifier;

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = CliArgs::parse();

	// Reject bad requests before touching the corpus
	let sentences = validate_sentence_count(args.sentences, args.max_sentences)?;

	let corpus = load_corpus(&args.corpus)
		.with_context(|| format!("Failed to load corpus {}", args.corpus.display()))?;
	let table = ChainBuilder::new().with_policy(args.successor_policy()).build(&corpus);
	log::info!(
		"chain built: {} keys, {} transitions, {} start tokens",
		table.len(),
		table.transition_count(),
		table.start_tokens().len()
	);

	let sentence_end = match &args.sentence_end {
		Some(pattern) => SentenceEnd::pattern(pattern).context("Invalid --sentence-end")?,
		None => SentenceEnd::default(),
	};
	let generator = Generator::new(&table).with_sentence_end(sentence_end);

	let start = match &args.start {
		Some(token) => StartToken::Custom(token.as_str()),
		None => StartToken::RandomCapitalized,
	};
	let input = GenerationInput::new(sentences)?.with_policy(args.policy).with_start(start);

	let notifier = match &args.webhook_url {
		Some(url) => Some(WebhookNotifier::new(url, &args.webhook_username, &args.webhook_icon)?),
		None => None,
	};

	for _ in 0..args.count {
		let text = generator.generate(&input)?;
		println!("{text}");

		if let Some(notifier) = &notifier {
			notifier.post(&text)?;
		}
	}

	Ok(())
}
