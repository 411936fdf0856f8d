use std::collections::HashSet;
use std::path::Path;

use log::info;

use super::generation_config::GenerationConfig;
use crate::error::Result;
use crate::io::read_file;

/// Frequency-ranked list of target words.
///
/// # Invariants
/// - Words are lowercase ASCII letters only
/// - Word lengths are within the configured bounds
/// - No duplicates; rank order of the source is preserved
/// - At most `target_vocab_size` words
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
	words: Vec<String>,
}

impl Vocabulary {
	/// Loads a ranked word list, most frequent first.
	///
	/// # Format
	/// One entry per line. The first whitespace-separated field is the word;
	/// further columns (frequencies, counts) are ignored. Blank lines and
	/// lines starting with `#` are skipped.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn from_file<P: AsRef<Path>>(path: P, config: &GenerationConfig) -> Result<Self> {
		let lines = read_file(&path)?;
		let words = lines.iter().filter_map(|line| {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				return None;
			}
			line.split_whitespace().next()
		});
		let vocabulary = Self::from_words(words, config);
		info!(
			"Loaded {} vocabulary words from {} ({} lines)",
			vocabulary.len(),
			path.as_ref().display(),
			lines.len()
		);
		Ok(vocabulary)
	}

	/// Filters an in-memory ranked word list.
	///
	/// Keeps alphabetic ASCII words within the length bounds, lowercased,
	/// first occurrence only, truncated to `target_vocab_size`.
	pub fn from_words<I, S>(words: I, config: &GenerationConfig) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut seen = HashSet::new();
		let mut kept = Vec::new();
		for word in words {
			if kept.len() >= config.target_vocab_size() {
				break;
			}
			let word = word.as_ref();
			if !Self::is_eligible(word, config) {
				continue;
			}
			let word = word.to_ascii_lowercase();
			if seen.insert(word.clone()) {
				kept.push(word);
			}
		}
		Self { words: kept }
	}

	/// Whether `word` passes the alphabet and length filter.
	pub fn is_eligible(word: &str, config: &GenerationConfig) -> bool {
		!word.is_empty()
			&& word.chars().all(|c| c.is_ascii_alphabetic())
			&& (config.min_word_length()..=config.max_word_length()).contains(&word.len())
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}
}
