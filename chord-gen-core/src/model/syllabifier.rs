use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ChordGenError, Result};
use crate::io::{build_cache_path, fingerprint};

/// Separator between syllables in hyphenation dictionaries.
pub const HYPHEN: char = '-';

/// Source of canonical syllabifications.
///
/// Implementations must be shareable across the generator worker threads.
/// The returned fragments are expected to spell `word`; if they do not, the
/// word is skipped downstream.
pub trait Syllabifier: Send + Sync {
	fn syllabify(&self, word: &str) -> Vec<String>;
}

/// Treats every word as a single syllable.
///
/// Words then only get their letter spelling and whole-word chord.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleSyllable;

impl Syllabifier for SingleSyllable {
	fn syllabify(&self, word: &str) -> Vec<String> {
		vec![word.to_ascii_lowercase()]
	}
}

/// Dictionary of hyphenated words, e.g. `clas-si-fi-ca-tion`.
///
/// Unknown words are returned whole, as a hyphenator does for words it has
/// no break point for.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct HyphenationDictionary {
	/// Lowercase word → syllables.
	entries: HashMap<String, Vec<String>>,
}

/// On-disk form of a parsed dictionary.
///
/// The header identifies the text source the entries were parsed from; a
/// cache whose header does not match the current source is stale.
#[derive(Serialize, Deserialize, Debug)]
struct CachedDictionary {
	source_name: String,
	source_len: u64,
	source_fingerprint: u64,
	dictionary: HyphenationDictionary,
}

impl CachedDictionary {
	fn matches(&self, source_name: &str, contents: &[u8]) -> bool {
		self.source_name == source_name
			&& self.source_len == contents.len() as u64
			&& self.source_fingerprint == fingerprint(contents)
	}
}

impl HyphenationDictionary {
	/// Loads a dictionary, using the binary cache when it matches the source.
	///
	/// - `path` is the text dictionary.
	/// - `<file name>.bin` next to it holds the parsed dictionary (`postcard`),
	///   e.g. `hyph.txt` → `hyph.txt.bin`.
	/// - The cache records the source file name, length and content
	///   fingerprint; it is rebuilt whenever one of them differs, or when it
	///   is missing or unreadable.
	///
	/// # Errors
	/// I/O errors on the text file or malformed lines.
	/// A stale or corrupt cache, or failing to write it, only logs a warning.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let cache_path = build_cache_path(path, "bin")?;
		let source_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
		let contents = std::fs::read_to_string(path)?;

		match std::fs::read(&cache_path) {
			Ok(bytes) => match postcard::from_bytes::<CachedDictionary>(&bytes) {
				Ok(cached) if cached.matches(&source_name, contents.as_bytes()) => {
					info!(
						"Loaded {} hyphenation entries from cache {}",
						cached.dictionary.len(),
						cache_path.display()
					);
					return Ok(cached.dictionary);
				}
				Ok(_) => debug!("Hyphenation cache {} is stale, rebuilding", cache_path.display()),
				Err(e) => warn!("Ignoring unreadable hyphenation cache {}: {}", cache_path.display(), e),
			},
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => (),
			Err(e) => warn!("Could not read hyphenation cache {}: {}", cache_path.display(), e),
		}

		let dictionary = Self::parse(path, &contents)?;
		info!("Parsed {} hyphenation entries from {}", dictionary.len(), path.display());

		let cached = CachedDictionary {
			source_name,
			source_len: contents.len() as u64,
			source_fingerprint: fingerprint(contents.as_bytes()),
			dictionary,
		};
		let bytes = postcard::to_stdvec(&cached)?;
		if let Err(e) = std::fs::write(&cache_path, bytes) {
			warn!("Could not write hyphenation cache {}: {}", cache_path.display(), e);
		}
		Ok(cached.dictionary)
	}

	/// Parses the text form of a dictionary read from `path`.
	///
	/// # Format
	/// - `clas-si-fi-ca-tion`: the word is the fragments joined together
	/// - `classification<TAB>clas-si-fi-ca-tion`: explicit word column
	///
	/// Blank lines and `#` comments are ignored; the first entry of a word wins.
	fn parse(path: &Path, contents: &str) -> Result<Self> {
		let mut dictionary = Self::default();
		for (number, line) in contents.lines().enumerate() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let fields: Vec<&str> = line.split_whitespace().collect();
			let (word, hyphenated) = match fields.as_slice() {
				[hyphenated] => (hyphenated.replace(HYPHEN, ""), *hyphenated),
				[word, hyphenated] => (word.to_string(), *hyphenated),
				_ => {
					return Err(ChordGenError::InvalidFormat {
						path: path.to_path_buf(),
						msg: format!("line {}: expected `word<TAB>hyph-en-ated` or `hyph-en-ated`", number + 1),
					});
				}
			};
			dictionary.insert(&word, hyphenated.split(HYPHEN).map(str::to_owned).collect());
		}
		Ok(dictionary)
	}

	/// Adds a syllabification unless `word` already has one.
	pub fn insert(&mut self, word: &str, syllables: Vec<String>) -> bool {
		let key = word.to_ascii_lowercase();
		if self.entries.contains_key(&key) {
			return false;
		}
		self.entries.insert(key, syllables);
		true
	}

	pub fn get(&self, word: &str) -> Option<&[String]> {
		self.entries.get(&word.to_ascii_lowercase()).map(Vec::as_slice)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(String, Vec<String>)> for HyphenationDictionary {
	fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
		let mut dictionary = Self::default();
		for (word, syllables) in iter {
			dictionary.insert(&word, syllables);
		}
		dictionary
	}
}

impl Syllabifier for HyphenationDictionary {
	fn syllabify(&self, word: &str) -> Vec<String> {
		match self.get(word) {
			Some(syllables) => syllables.to_vec(),
			None => SingleSyllable.syllabify(word),
		}
	}
}
