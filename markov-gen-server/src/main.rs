use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markov_gen_core::io::load_corpus;
use markov_gen_core::{
	validate_sentence_count, ChainBuilder, GenerationInput, Generator, MarkovError, SentenceEnd, SentencePolicy,
	StartToken, TransitionTable,
};

mod config;
mod store;

use config::ServerArgs;
use store::OutputStore;

/// Query parameters shared by the generation endpoints.
#[derive(Deserialize)]
struct GenerateParams {
	sentences: Option<usize>,
	policy: Option<String>,
	start: Option<String>, // -> "random" or "custom:<token>"
}

#[derive(Serialize)]
struct GeneratedText {
	text: String,
	sentences: usize,
}

#[derive(Serialize)]
struct StoredOutput {
	id: String,
	text: String,
}

#[derive(Serialize)]
struct ChainStats {
	keys: usize,
	transitions: usize,
	start_tokens: usize,
	stored_outputs: usize,
}

/// Everything a request needs, built once at startup and never mutated
/// (apart from the output store, which has its own lock).
struct AppState {
	table: TransitionTable,
	sentence_end: SentenceEnd,
	max_sentences: usize,
	default_policy: SentencePolicy,
	outputs: OutputStore,
}

impl AppState {
	fn generator(&self) -> Generator<'_> {
		Generator::new(&self.table).with_sentence_end(self.sentence_end.clone())
	}
}

impl GenerateParams {
	/// Validates the query against the server limits.
	fn generation_input(&self, state: &AppState) -> Result<GenerationInput<'_>, MarkovError> {
		let count = validate_sentence_count(self.sentences.unwrap_or(1), state.max_sentences)?;
		let policy = match &self.policy {
			Some(policy) => policy.parse::<SentencePolicy>()?,
			None => state.default_policy,
		};
		let start = match &self.start {
			Some(start) => StartToken::parse(start)?,
			None => StartToken::RandomCapitalized,
		};
		Ok(GenerationInput::new(count)?.with_policy(policy).with_start(start))
	}

	fn generate(&self, state: &AppState) -> Result<(String, usize), MarkovError> {
		let input = self.generation_input(state)?;
		let text = state.generator().generate(&input)?;
		Ok((text, input.sentence_count()))
	}
}

/// Maps a generation error to a response.
///
/// Caller mistakes are `400`, a chain that cannot produce text is `422`.
fn error_response(error: MarkovError) -> HttpResponse {
	log::warn!("generation failed: {error}");
	match error {
		MarkovError::InvalidSentenceCount { .. }
		| MarkovError::UnknownStartToken(_)
		| MarkovError::InvalidPolicy(_)
		| MarkovError::InvalidStartToken(_) => HttpResponse::BadRequest().body(error.to_string()),
		MarkovError::EmptyTable | MarkovError::NoCapitalizedStartToken => {
			HttpResponse::UnprocessableEntity().body(error.to_string())
		}
		_ => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the generated text as a plain body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<AppState>, query: web::Query<GenerateParams>) -> impl Responder {
	match query.generate(&data) {
		Ok((text, _)) => HttpResponse::Ok().body(text),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/generate/json`
#[get("/v1/generate/json")]
async fn get_generated_json(data: web::Data<AppState>, query: web::Query<GenerateParams>) -> impl Responder {
	match query.generate(&data) {
		Ok((text, sentences)) => HttpResponse::Ok().json(GeneratedText { text, sentences }),
		Err(e) => error_response(e),
	}
}

/// HTTP POST endpoint `/v1/outputs`
///
/// Generates like `/v1/generate` and keeps the result for later retrieval.
#[post("/v1/outputs")]
async fn post_output(data: web::Data<AppState>, query: web::Query<GenerateParams>) -> impl Responder {
	let text = match query.generate(&data) {
		Ok((text, _)) => text,
		Err(e) => return error_response(e),
	};

	match data.outputs.insert(text.clone()) {
		Ok(id) => HttpResponse::Created().json(StoredOutput { id: id.to_string(), text }),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

#[get("/v1/outputs/{id}")]
async fn get_output(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
	let id = match Uuid::parse_str(&path) {
		Ok(id) => id,
		Err(_) => return HttpResponse::BadRequest().body("Output id must be a UUID"),
	};

	match data.outputs.get(&id) {
		Ok(Some(text)) => HttpResponse::Ok().json(StoredOutput { id: id.to_string(), text }),
		Ok(None) => HttpResponse::NotFound().body("Output not found"),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<AppState>) -> impl Responder {
	HttpResponse::Ok().json(ChainStats {
		keys: data.table.len(),
		transitions: data.table.transition_count(),
		start_tokens: data.table.start_tokens().len(),
		stored_outputs: data.outputs.len(),
	})
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_generated_json)
		.service(post_output)
		.service(get_output)
		.service(get_stats);
}

/// Loads the corpus and builds the shared state from the command line.
fn build_state(args: &ServerArgs) -> anyhow::Result<AppState> {
	if args.max_sentences == 0 {
		anyhow::bail!("--max-sentences must be at least 1");
	}

	let corpus = load_corpus(&args.corpus)
		.with_context(|| format!("Failed to load corpus {}", args.corpus.display()))?;
	let table = ChainBuilder::new().with_policy(args.successor_policy()).build(&corpus);

	if table.is_empty() {
		log::warn!("corpus {} produced an empty chain, generation will fail", args.corpus.display());
	} else if table.start_tokens().is_empty() {
		log::warn!("corpus {} has no capitalized token, random starts will fail", args.corpus.display());
	}

	let sentence_end = match &args.sentence_end {
		Some(pattern) => SentenceEnd::pattern(pattern).context("Invalid --sentence-end")?,
		None => SentenceEnd::default(),
	};

	Ok(AppState {
		table,
		sentence_end,
		max_sentences: args.max_sentences,
		default_policy: args.policy,
		outputs: OutputStore::new(args.store_capacity),
	})
}

/// Main entry point for the server.
///
/// Builds the chain once, shares it read-only between workers
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = ServerArgs::parse();
	let state = web::Data::new(build_state(&args)?);
	log::info!(
		"chain ready: {} keys, {} transitions, listening on {}:{}",
		state.table.len(),
		state.table.transition_count(),
		args.host,
		args.port
	);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "POST"]))
			.app_data(state.clone())
			.configure(routes)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}
