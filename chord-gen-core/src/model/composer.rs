use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::boundary_shift::shift_variants;
use super::encoder::{encode_sequence, letters_of};
use super::generation_config::GenerationConfig;
use super::noise::NoiseInjector;
use crate::error::SkipReason;

/// Noisy draws performed for each clean variant.
pub const NOISY_DRAWS_PER_VARIANT: usize = 2;

/// One training record: a chord sequence and the word it stands for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Example {
	pub chords: String,
	pub target_word: String,
}

/// A syllabification before encoding, flagged when noise was injected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
	pub syllables: Vec<String>,
	pub noisy: bool,
}

/// Deduplicated examples of one word, in first-seen order.
///
/// # Invariants
/// - No two examples share the same `chords`
/// - Every example targets `word`
/// - `noisy` counts the examples that came from a corrupted variant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordExampleSet {
	word: String,
	examples: Vec<Example>,
	seen: HashSet<String>,
	noisy: usize,
}

impl WordExampleSet {
	fn new(word: &str) -> Self {
		Self { word: word.to_owned(), examples: Vec::new(), seen: HashSet::new(), noisy: 0 }
	}

	/// Adds a chord string unless it was already produced. First seen wins.
	fn add(&mut self, chords: String, noisy: bool) -> bool {
		if !self.seen.insert(chords.clone()) {
			return false;
		}
		self.examples.push(Example { chords, target_word: self.word.clone() });
		if noisy {
			self.noisy += 1;
		}
		true
	}

	pub fn word(&self) -> &str {
		&self.word
	}

	pub fn examples(&self) -> &[Example] {
		&self.examples
	}

	pub fn len(&self) -> usize {
		self.examples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.examples.is_empty()
	}

	/// Number of kept examples produced by noise injection.
	pub fn noisy_examples(&self) -> usize {
		self.noisy
	}

	pub fn contains(&self, chords: &str) -> bool {
		self.seen.contains(chords)
	}

	pub fn into_examples(self) -> Vec<Example> {
		self.examples
	}
}

/// Checks an external syllabification against its word and lowercases it.
///
/// # Errors
/// A `SkipReason` when the split is empty, has an empty or non-alphabetic
/// fragment, or does not spell `word`.
pub fn normalize_split<S: AsRef<str>>(word: &str, canonical: &[S]) -> Result<Vec<String>, SkipReason> {
	if canonical.is_empty() {
		return Err(SkipReason::EmptySyllabification);
	}

	let mut syllables = Vec::with_capacity(canonical.len());
	for (i, syllable) in canonical.iter().enumerate() {
		let syllable = syllable.as_ref();
		if syllable.is_empty() {
			return Err(SkipReason::EmptySyllable(i));
		}
		if !syllable.chars().all(|c| c.is_ascii_alphabetic()) {
			return Err(SkipReason::NonAlphabetic(syllable.to_owned()));
		}
		syllables.push(syllable.to_ascii_lowercase());
	}

	let joined = syllables.concat();
	if joined != word.to_ascii_lowercase() {
		return Err(SkipReason::Mismatch { word: word.to_owned(), joined });
	}
	Ok(syllables)
}

/// Builds the example set of each word.
///
/// # Steps
/// 1. Letter-by-letter spelling (always clean)
/// 2. Canonical split + boundary-shifted splits, up to `clean_variants_per_word`
/// 3. Two noisy draws per clean split, each corrupted with probability `noise_rate`
/// 4. Deduplication by chord string, first seen wins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantComposer {
	noise: NoiseInjector,
	noise_rate: f64,
	clean_variants_per_word: usize,
}

impl VariantComposer {
	/// Builds a composer from a validated configuration.
	pub fn new(config: &GenerationConfig) -> Self {
		Self {
			noise: NoiseInjector::new(config),
			noise_rate: config.noise_rate(),
			clean_variants_per_word: config.clean_variants_per_word(),
		}
	}

	/// Canonical split followed by its boundary-shifted alternatives.
	pub fn clean_variants(&self, canonical: Vec<String>) -> Vec<Variant> {
		let cap = self.clean_variants_per_word.saturating_sub(1);
		let shifted = shift_variants(&canonical, cap);
		std::iter::once(canonical)
			.chain(shifted)
			.map(|syllables| Variant { syllables, noisy: false })
			.collect()
	}

	/// One noisy draw over a clean variant.
	///
	/// On a failed draw the clean variant is returned as is.
	pub fn noisy_draw<R: Rng + ?Sized>(&self, clean: &Variant, rng: &mut R) -> Variant {
		if rng.random_bool(self.noise_rate) {
			Variant { syllables: self.noise.corrupt(&clean.syllables, rng), noisy: true }
		} else {
			clean.clone()
		}
	}

	/// Generates the deduplicated example set of `word`.
	///
	/// # Errors
	/// Returns the `SkipReason` if `canonical` is unusable; the word then
	/// produces no example.
	pub fn generate<S, R>(&self, word: &str, canonical: &[S], rng: &mut R) -> Result<WordExampleSet, SkipReason>
	where
		S: AsRef<str>,
		R: Rng + ?Sized,
	{
		let canonical = normalize_split(word, canonical)?;
		let word = word.to_ascii_lowercase();
		let mut set = WordExampleSet::new(&word);

		set.add(encode_sequence(&letters_of(&word)), false);

		let clean = self.clean_variants(canonical);
		for variant in &clean {
			set.add(encode_sequence(&variant.syllables), variant.noisy);
		}

		for variant in &clean {
			for _ in 0..NOISY_DRAWS_PER_VARIANT {
				let drawn = self.noisy_draw(variant, rng);
				set.add(encode_sequence(&drawn.syllables), drawn.noisy);
			}
		}

		Ok(set)
	}
}

/// Generates the example set of one word with a one-off composer.
pub fn generate<S, R>(
	word: &str,
	canonical: &[S],
	rng: &mut R,
	config: &GenerationConfig,
) -> Result<WordExampleSet, SkipReason>
where
	S: AsRef<str>,
	R: Rng + ?Sized,
{
	VariantComposer::new(config).generate(word, canonical, rng)
}
