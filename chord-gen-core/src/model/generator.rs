use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::composer::{Example, VariantComposer, WordExampleSet};
use super::generation_config::GenerationConfig;
use super::syllabifier::Syllabifier;
use super::vocabulary::Vocabulary;
use crate::error::{Result, SkipReason};
use crate::io::write_csv_atomic;

/// CSV header of the dataset file.
pub const CSV_HEADER: [&str; 2] = ["chords", "target_word"];

/// SplitMix64 finalizer, used to spread seeds over the whole `u64` space.
fn splitmix64(mut z: u64) -> u64 {
	z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
	z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
	z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
	z ^ (z >> 31)
}

/// Independent random stream of the word at `rank`.
///
/// Depends only on the master seed and the rank, so output does not change
/// with the number of worker threads.
pub fn word_rng(seed: u64, rank: usize) -> StdRng {
	StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(rank as u64)))
}

/// Outcome of one word: its example set, or the word and why it was skipped.
pub type WordOutcome = std::result::Result<WordExampleSet, (String, SkipReason)>;

/// Aggregate figures of a generated dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetSummary {
	pub total_examples: usize,
	pub unique_words: usize,
	pub skipped_words: usize,
	/// Rows produced by noise injection.
	pub noisy_examples: usize,
}

impl DatasetSummary {
	/// Average number of examples per generated word.
	pub fn average_per_word(&self) -> f64 {
		if self.unique_words == 0 {
			return 0.0;
		}
		self.total_examples as f64 / self.unique_words as f64
	}
}

impl fmt::Display for DatasetSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "  Total examples  : {}", self.total_examples)?;
		writeln!(f, "  Unique words    : {}", self.unique_words)?;
		writeln!(f, "  Avg variants/wd : {:.1}", self.average_per_word())?;
		writeln!(f, "  Noisy examples  : {}", self.noisy_examples)?;
		write!(f, "  Skipped words   : {}", self.skipped_words)
	}
}

/// Shuffled training rows of a whole vocabulary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	rows: Vec<Example>,
	summary: DatasetSummary,
}

impl Dataset {
	pub fn rows(&self) -> &[Example] {
		&self.rows
	}

	pub fn summary(&self) -> &DatasetSummary {
		&self.summary
	}

	/// Up to `amount` distinct rows picked at random, for previews.
	pub fn sample<R: rand::Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<&Example> {
		self.rows.choose_multiple(rng, amount).collect()
	}

	/// Writes the dataset as CSV (`chords,target_word`).
	///
	/// The file is replaced atomically; parent directories are created.
	pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let rows = self.rows.iter().map(|e| [e.chords.as_str(), e.target_word.as_str()]);
		write_csv_atomic(&path, CSV_HEADER, rows)?;
		info!("Dataset written to {} ({} rows)", path.as_ref().display(), self.rows.len());
		Ok(())
	}
}

/// Drives per-word generation over a whole vocabulary.
///
/// # Responsibilities
/// - Look up each word's canonical split
/// - Generate every word's example set on a deterministic sub-stream
/// - Spread words over worker threads and reassemble them in rank order
/// - Shuffle the rows with the master seed
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
	config: GenerationConfig,
	composer: VariantComposer,
}

impl DatasetGenerator {
	/// Creates a generator from a configuration.
	///
	/// # Errors
	/// Returns the configuration error if `config` is invalid.
	pub fn new(config: GenerationConfig) -> Result<Self> {
		config.validate()?;
		let composer = VariantComposer::new(&config);
		Ok(Self { config, composer })
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Generates the example set of the word at `rank`.
	pub fn generate_word<S: Syllabifier + ?Sized>(&self, rank: usize, word: &str, syllabifier: &S) -> WordOutcome {
		let canonical = syllabifier.syllabify(word);
		let mut rng = word_rng(self.config.seed(), rank);
		self.composer
			.generate(word, &canonical, &mut rng)
			.map_err(|reason| (word.to_owned(), reason))
	}

	/// Generates, collects and shuffles the dataset of `vocabulary`.
	///
	/// # Behavior
	/// - Splits the vocabulary into chunks (CPU cores * factor).
	/// - Each worker thread generates its chunk and sends it back with its index.
	/// - Chunks are reassembled in rank order, so the result only depends on
	///   the seed and the inputs.
	/// - Skipped words are counted and logged at debug level.
	pub fn run<S: Syllabifier + ?Sized>(&self, vocabulary: &Vocabulary, syllabifier: &S) -> Dataset {
		let words = vocabulary.words();
		info!("Generating variants for {} words", words.len());

		let mut outcomes: Vec<WordOutcome> = Vec::with_capacity(words.len());
		if !words.is_empty() {
			let cpus = num_cpus::get();
			let factor = 8;
			let chunks = cpus * factor;
			let chunk_size = words.len().div_ceil(chunks);

			let mut partials: Vec<Option<Vec<WordOutcome>>> = Vec::new();
			thread::scope(|scope| {
				let (tx, rx) = mpsc::channel();
				for (chunk_index, chunk) in words.chunks(chunk_size).enumerate() {
					let tx = tx.clone();
					scope.spawn(move || {
						let first_rank = chunk_index * chunk_size;
						let partial: Vec<WordOutcome> = chunk
							.iter()
							.enumerate()
							.map(|(i, word)| self.generate_word(first_rank + i, word, syllabifier))
							.collect();
						tx.send((chunk_index, partial)).expect("Failed to send from thread");
					});
					partials.push(None);
				}
				drop(tx);

				for (chunk_index, partial) in rx.iter() {
					partials[chunk_index] = Some(partial);
				}
			});
			outcomes.extend(partials.into_iter().flatten().flatten());
		}

		let mut summary = DatasetSummary::default();
		let mut unique_words = HashSet::new();
		let mut rows = Vec::new();
		for outcome in outcomes {
			match outcome {
				Ok(set) => {
					unique_words.insert(set.word().to_owned());
					summary.noisy_examples += set.noisy_examples();
					rows.extend(set.into_examples());
				}
				Err((word, reason)) => {
					debug!("Skipping {:?}: {}", word, reason);
					summary.skipped_words += 1;
				}
			}
		}

		// Rows must not be grouped by word.
		let mut rng = StdRng::seed_from_u64(self.config.seed());
		rows.shuffle(&mut rng);

		summary.total_examples = rows.len();
		summary.unique_words = unique_words.len();
		info!(
			"Generated {} examples for {} words ({} noisy, {} skipped)",
			summary.total_examples, summary.unique_words, summary.noisy_examples, summary.skipped_words
		);

		Dataset { rows, summary }
	}
}
