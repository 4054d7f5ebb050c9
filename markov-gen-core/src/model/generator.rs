use rand::Rng;

use crate::error::{MarkovError, Result};
use crate::model::chain::TransitionTable;
use crate::model::generation_input::{GenerationInput, SentencePolicy, StartToken};
use crate::model::sentence_end::SentenceEnd;

/// Upper bound on the words emitted by one walk.
///
/// A chain can cycle without ever reaching a sentence end (`"a b a b"`),
/// the walk is truncated at this length instead.
pub const DEFAULT_MAX_WORDS: usize = 1_000;

/// Walks a `TransitionTable` to produce sentences.
///
/// # Responsibilities
/// - Select a start token (random capitalized key or caller supplied)
/// - Walk the chain until enough sentence ends were produced or a dead-end is hit
/// - Apply the multi-sentence `SentencePolicy`
///
/// The generator only borrows the table, so one table can back any number of
/// generators on different threads. Randomness comes either from the caller
/// (`*_with_rng`) or from a thread-local generator created per call.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
	table: &'a TransitionTable,
	sentence_end: SentenceEnd,
	max_words: usize,
}

impl<'a> Generator<'a> {
	/// Generator using the default sentence end (`.`, `!`, `?`).
	pub fn new(table: &'a TransitionTable) -> Self {
		Self { table, sentence_end: SentenceEnd::default(), max_words: DEFAULT_MAX_WORDS }
	}

	pub fn with_sentence_end(mut self, sentence_end: SentenceEnd) -> Self {
		self.sentence_end = sentence_end;
		self
	}

	/// Caps the words of a single walk (at least one).
	pub fn with_max_words(mut self, max_words: usize) -> Self {
		self.max_words = max_words.max(1);
		self
	}

	pub fn table(&self) -> &'a TransitionTable {
		self.table
	}

	/// Returns a uniformly random key whose first character is uppercase.
	///
	/// # Errors
	/// - `MarkovError::EmptyTable` if the table has no keys.
	/// - `MarkovError::NoCapitalizedStartToken` if no key is capitalized.
	pub fn random_capitalized_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'a str> {
		if self.table.is_empty() {
			return Err(MarkovError::EmptyTable);
		}
		let starts = self.table.start_tokens();
		if starts.is_empty() {
			return Err(MarkovError::NoCapitalizedStartToken);
		}
		Ok(starts[rng.random_range(0..starts.len())].as_str())
	}

	/// Walks the chain from `start` until `sentence_limit` sentence ends were drawn.
	///
	/// Each step appends the current token and moves to a random successor.
	/// When the successor that completes the last sentence is drawn, it is
	/// appended too and the walk stops. A token without successors stops the
	/// walk silently and is not appended: the output is then truncated.
	/// Reaching the word cap truncates the same way.
	pub fn walk_with_rng<R: Rng + ?Sized>(&self, start: &str, sentence_limit: usize, rng: &mut R) -> String {
		let mut output: Vec<&str> = Vec::new();
		let mut current = start;
		let mut sentences = 0;

		while let Some(next) = self.table.next_token(current, rng) {
			if output.len() >= self.max_words {
				log::debug!("walk from '{start}' truncated at {} words", self.max_words);
				break;
			}
			output.push(current);
			current = next;

			if self.sentence_end.is_end(next) {
				sentences += 1;
				if sentences >= sentence_limit {
					output.push(next);
					break;
				}
			}
		}

		if output.is_empty() {
			log::debug!("walk from '{start}' dead-ended immediately");
		}
		output.truncate(self.max_words);
		output.join(" ").trim().to_owned()
	}

	pub fn walk(&self, start: &str, sentence_limit: usize) -> String {
		self.walk_with_rng(start, sentence_limit, &mut rand::rng())
	}

	/// Generates text according to `input`.
	///
	/// # Errors
	/// - `MarkovError::EmptyTable` when the table has no keys (checked first).
	/// - `MarkovError::UnknownStartToken` when a custom start is not a key.
	/// - `MarkovError::NoCapitalizedStartToken` when a random start is needed but none exists.
	pub fn generate_with_rng<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<String> {
		if self.table.is_empty() {
			return Err(MarkovError::EmptyTable);
		}

		let first = match input.start {
			StartToken::RandomCapitalized => self.random_capitalized_key(rng)?,
			StartToken::Custom(token) if self.table.contains(token) => token,
			StartToken::Custom(token) => return Err(MarkovError::UnknownStartToken(token.to_owned())),
		};

		let count = input.sentence_count();
		match input.policy {
			SentencePolicy::SingleWalk => Ok(self.walk_with_rng(first, count, rng)),
			SentencePolicy::RestartPerSentence => {
				let mut sentences = Vec::with_capacity(count);
				sentences.push(self.walk_with_rng(first, 1, rng));
				for _ in 1..count {
					let start = self.random_capitalized_key(rng)?;
					sentences.push(self.walk_with_rng(start, 1, rng));
				}
				Ok(sentences.join(" ").trim().to_owned())
			}
		}
	}

	pub fn generate(&self, input: &GenerationInput) -> Result<String> {
		self.generate_with_rng(input, &mut rand::rng())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::chain::ChainBuilder;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn is_terminal(token: &str) -> bool {
		SentenceEnd::default().is_end(token)
	}

	#[test]
	fn linear_chain_is_reproduced_for_any_seed() {
		let table = ChainBuilder::new().build("This is super great thing.");
		let generator = Generator::new(&table);
		let input = GenerationInput::default().with_start(StartToken::Custom("This"));

		for seed in 0..50 {
			let mut rng = StdRng::seed_from_u64(seed);
			assert_eq!(generator.generate_with_rng(&input, &mut rng).unwrap(), "This is super great thing.");
		}
	}

	#[test]
	fn linear_chain_from_random_start() {
		let table = ChainBuilder::new().build("This is super great thing.");
		let generator = Generator::new(&table);
		assert_eq!(generator.generate(&GenerationInput::default()).unwrap(), "This is super great thing.");
	}

	#[test]
	fn empty_table_fails_fast() {
		let table = ChainBuilder::new().build("Alone.");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(1);

		assert!(matches!(generator.random_capitalized_key(&mut rng), Err(MarkovError::EmptyTable)));
		for policy in [SentencePolicy::SingleWalk, SentencePolicy::RestartPerSentence] {
			let input = GenerationInput::new(3).unwrap().with_policy(policy);
			assert!(matches!(generator.generate_with_rng(&input, &mut rng), Err(MarkovError::EmptyTable)));
		}
		let input = GenerationInput::default().with_start(StartToken::Custom("Alone."));
		assert!(matches!(generator.generate_with_rng(&input, &mut rng), Err(MarkovError::EmptyTable)));
	}

	#[test]
	fn no_capitalized_key_is_an_error() {
		let table = ChainBuilder::new().build("all lower case words here.");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(3);
		assert!(matches!(
			generator.generate_with_rng(&GenerationInput::default(), &mut rng),
			Err(MarkovError::NoCapitalizedStartToken)
		));

		// A custom start does not need the capitalized index.
		let input = GenerationInput::default().with_start(StartToken::Custom("all"));
		assert_eq!(generator.generate_with_rng(&input, &mut rng).unwrap(), "all lower case words here.");
	}

	#[test]
	fn unknown_custom_start_is_an_error() {
		let table = ChainBuilder::new().build("As a user I want.");
		let generator = Generator::new(&table);
		let input = GenerationInput::default().with_start(StartToken::Custom("Zebra"));
		assert!(matches!(generator.generate(&input), Err(MarkovError::UnknownStartToken(t)) if t == "Zebra"));
	}

	#[test]
	fn random_start_is_always_capitalized() {
		let table = ChainBuilder::new().build("the Cat sat on a Mat and Émile said no. yes Óscar?");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..500 {
			let key = generator.random_capitalized_key(&mut rng).unwrap();
			assert!(key.chars().next().unwrap().is_uppercase(), "'{key}' is not capitalized");
			assert!(table.contains(key));
		}
	}

	#[test]
	fn random_start_covers_every_capitalized_key() {
		let table = ChainBuilder::new().build("Alpha x Beta y Gamma z end.");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(5);

		let mut seen = std::collections::HashSet::new();
		for _ in 0..300 {
			seen.insert(generator.random_capitalized_key(&mut rng).unwrap());
		}
		assert_eq!(seen.len(), 3);
	}

	#[test]
	fn dead_end_truncates_silently() {
		// "d." ends the corpus and has no successor.
		let table = ChainBuilder::new().build("A b. C d.");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(0);

		// The limit is never reached, the walk stops at the dead-end.
		assert_eq!(generator.walk_with_rng("C", 2, &mut rng), "C");
		// Starting on the dead-end itself yields nothing.
		assert_eq!(generator.walk_with_rng("d.", 1, &mut rng), "");
		// Unknown start is a dead-end too.
		assert_eq!(generator.walk_with_rng("nowhere", 1, &mut rng), "");
	}

	#[test]
	fn endless_cycle_is_truncated() {
		let table = ChainBuilder::new().build("Round and Round and");
		let generator = Generator::new(&table).with_max_words(7);
		let input = GenerationInput::default().with_start(StartToken::Custom("Round"));
		assert_eq!(generator.generate(&input).unwrap(), "Round and Round and Round and Round");
	}

	#[test]
	fn single_walk_stops_after_requested_sentence_count() {
		let table = ChainBuilder::new().build("A b. C d. A e. C f. A b.");
		let generator = Generator::new(&table);
		let input = GenerationInput::new(2).unwrap().with_start(StartToken::Custom("C"));

		for seed in 0..50 {
			let mut rng = StdRng::seed_from_u64(seed);
			let text = generator.generate_with_rng(&input, &mut rng).unwrap();
			let tokens: Vec<&str> = text.split(' ').collect();

			let terminals: Vec<usize> = tokens
				.iter()
				.enumerate()
				.filter(|(_, t)| is_terminal(t))
				.map(|(i, _)| i)
				.collect();
			assert_eq!(terminals.len(), 2, "'{text}'");
			assert_eq!(*terminals.last().unwrap(), tokens.len() - 1, "'{text}'");
		}
	}

	#[test]
	fn single_walk_is_one_contiguous_excerpt() {
		let corpus = "A b. C d. A e. C f. A b.";
		let table = ChainBuilder::new().build(corpus);
		let generator = Generator::new(&table);
		let input = GenerationInput::new(3).unwrap();

		for seed in 0..50 {
			let mut rng = StdRng::seed_from_u64(seed);
			let text = generator.generate_with_rng(&input, &mut rng).unwrap();
			let tokens: Vec<&str> = text.split(' ').collect();
			for pair in tokens.windows(2) {
				assert!(table.successors(pair[0]).iter().any(|s| s == pair[1]), "'{text}'");
			}
		}
	}

	#[test]
	fn restart_policy_produces_one_walk_per_sentence() {
		let table = ChainBuilder::new().build("One fish. Two fish. Red fish. Blue fish.");
		let generator = Generator::new(&table);
		let input = GenerationInput::new(4)
			.unwrap()
			.with_policy(SentencePolicy::RestartPerSentence)
			.with_start(StartToken::Custom("Red"));

		for seed in 0..20 {
			let mut rng = StdRng::seed_from_u64(seed);
			let text = generator.generate_with_rng(&input, &mut rng).unwrap();
			let tokens: Vec<&str> = text.split(' ').collect();
			assert_eq!(tokens.len(), 8, "'{text}'");
			assert!(text.starts_with("Red fish."), "'{text}'");
			for sentence in tokens.chunks(2) {
				assert!(sentence[0].chars().next().unwrap().is_uppercase());
				assert_eq!(sentence[1], "fish.");
			}
		}
	}

	#[test]
	fn restart_policy_differs_from_single_walk() {
		// Single walk continues through "fish." which leads to lowercase "and".
		let table = ChainBuilder::new().build("One fish. and Two fish. and");
		let generator = Generator::new(&table);
		let mut rng = StdRng::seed_from_u64(9);

		let single = GenerationInput::new(2).unwrap().with_start(StartToken::Custom("One"));
		let text = generator.generate_with_rng(&single, &mut rng).unwrap();
		assert!(text.contains("and"), "'{text}'");

		let restart = single.with_policy(SentencePolicy::RestartPerSentence);
		let text = generator.generate_with_rng(&restart, &mut rng).unwrap();
		assert!(!text.contains("and"), "'{text}'");
	}

	#[test]
	fn pattern_sentence_end() {
		let table = ChainBuilder::new().build("Start here; then stop; Again here;");
		let generator = Generator::new(&table).with_sentence_end(SentenceEnd::pattern(".*;").unwrap());
		let input = GenerationInput::default().with_start(StartToken::Custom("Start"));
		assert_eq!(generator.generate(&input).unwrap(), "Start here;");
	}
}
