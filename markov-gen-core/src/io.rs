use std::fs;
use std::path::Path;

use crate::error::Result;

/// Separator appended after every record so its last word ends a sentence.
pub const RECORD_SEPARATOR: &str = ". ";

/// Loads a corpus, dispatching on the file extension.
///
/// - `.csv` (any case): see `read_csv_corpus`
/// - anything else: read verbatim
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	let is_csv = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

	let corpus = if is_csv { read_csv_corpus(path)? } else { read_text_corpus(path)? };
	log::info!("loaded corpus from {} ({} bytes)", path.display(), corpus.len());
	Ok(corpus)
}

/// Reads a text file and returns its contents unchanged.
pub fn read_text_corpus<P: AsRef<Path>>(path: P) -> Result<String> {
	Ok(fs::read_to_string(path)?)
}

/// Reads the first column of a CSV file and joins it into sentences.
///
/// - No header row, records may have any number of fields
/// - Records whose first field is blank are skipped
/// - Every kept field is followed by `". "`
pub fn read_csv_corpus<P: AsRef<Path>>(path: P) -> Result<String> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_path(path)?;

	let mut first_fields = Vec::new();
	for record in reader.records() {
		let record = record?;
		if let Some(field) = record.get(0) {
			first_fields.push(field.to_owned());
		}
	}
	Ok(join_records(first_fields))
}

/// Joins records as `"<record>. <record>. "`, skipping blank ones.
///
/// Example: `["As a user I want", "Stop"]` → `"As a user I want. Stop. "`
pub fn join_records<I, S>(records: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut corpus = String::new();
	for record in records {
		let record = record.as_ref().trim();
		if record.is_empty() {
			continue;
		}
		corpus.push_str(record);
		corpus.push_str(RECORD_SEPARATOR);
	}
	corpus
}
