use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};
use crate::io;

/// Parameters of a dataset generation run.
///
/// `GenerationConfig` holds both the **vocabulary bounds** (size, word length)
/// and the **variant/noise parameters** used per word.
///
/// # Responsibilities
/// - Provide the defaults of the reference generator
/// - Load overrides from a JSON file (upper-case keys, e.g. `NOISE_RATE`)
/// - Reject invalid values before any generation starts
///
/// # Invariants
/// Hold for every value of this type: fields are private, setters are
/// checked and deserialization validates.
/// - every probability is within `[0.0, 1.0]`
/// - `clean_variants_per_word >= 1` and `target_vocab_size >= 1`
/// - `1 <= min_word_length <= max_word_length`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(remote = "Self", default, rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct GenerationConfig {
	/// Number of vocabulary words kept after filtering.
	target_vocab_size: usize,

	/// Probability that a noisy draw actually corrupts the variant.
	noise_rate: f64,

	/// Per-syllable probability of a neighbouring-key substitution.
	key_sub_prob: f64,

	/// Per-syllable probability of dropping a letter.
	missing_letter_prob: f64,

	/// Per-syllable probability of doubling a letter.
	extra_letter_prob: f64,

	/// Canonical split plus boundary-shifted splits kept per word.
	clean_variants_per_word: usize,

	/// Shortest accepted vocabulary word.
	min_word_length: usize,

	/// Longest accepted vocabulary word.
	max_word_length: usize,

	/// Destination CSV file.
	output_file: PathBuf,

	/// Master seed; every random decision derives from it.
	seed: u64,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			target_vocab_size: 5000,
			noise_rate: 0.40,
			key_sub_prob: 0.12,
			missing_letter_prob: 0.10,
			extra_letter_prob: 0.08,
			clean_variants_per_word: 3,
			min_word_length: 3,
			max_word_length: 20,
			output_file: PathBuf::from("chord_dataset.csv"),
			seed: 42,
		}
	}
}

impl Serialize for GenerationConfig {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		GenerationConfig::serialize(self, serializer)
	}
}

impl<'de> Deserialize<'de> for GenerationConfig {
	/// Deserializes and validates; an out-of-range value is a deserialization error.
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let config = GenerationConfig::deserialize(deserializer)?;
		config.validate().map_err(D::Error::custom)?;
		Ok(config)
	}
}

fn check_probability(name: &'static str, value: f64) -> Result<f64, ConfigError> {
	if !(0.0..=1.0).contains(&value) {
		return Err(ConfigError::Probability { name, value });
	}
	Ok(value)
}

fn check_positive(name: &'static str, value: usize) -> Result<usize, ConfigError> {
	if value == 0 {
		return Err(ConfigError::NonPositive { name });
	}
	Ok(value)
}

impl GenerationConfig {
	/// Loads a configuration from a JSON file and validates it.
	///
	/// Missing keys keep their default value; unknown keys are rejected.
	///
	/// # Errors
	/// - I/O or JSON errors
	/// - `ConfigError` if a value is out of range
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = io::read_file(path)?.join("\n");
		Self::from_json(&contents)
	}

	/// Parses a configuration from a JSON string and validates it.
	///
	/// Range errors come back as `ConfigError` rather than as JSON errors.
	pub fn from_json(json: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(json);
		let config = GenerationConfig::deserialize(&mut deserializer)?;
		deserializer.end()?;
		config.validate()?;
		Ok(config)
	}

	/// Checks every invariant of the configuration.
	///
	/// This is the only fatal error path of the generator.
	pub fn validate(&self) -> Result<(), ConfigError> {
		check_positive("TARGET_VOCAB_SIZE", self.target_vocab_size)?;
		check_probability("NOISE_RATE", self.noise_rate)?;
		check_probability("KEY_SUB_PROB", self.key_sub_prob)?;
		check_probability("MISSING_LETTER_PROB", self.missing_letter_prob)?;
		check_probability("EXTRA_LETTER_PROB", self.extra_letter_prob)?;
		check_positive("CLEAN_VARIANTS_PER_WORD", self.clean_variants_per_word)?;
		check_positive("MIN_WORD_LENGTH", self.min_word_length)?;
		if self.min_word_length > self.max_word_length {
			return Err(ConfigError::LengthBounds { min: self.min_word_length, max: self.max_word_length });
		}
		Ok(())
	}

	/// Upper bound of examples for one word: letter spelling, clean variants
	/// and two noisy draws per clean variant.
	pub fn max_examples_per_word(&self) -> usize {
		1 + 3 * self.clean_variants_per_word
	}

	pub fn target_vocab_size(&self) -> usize {
		self.target_vocab_size
	}

	pub fn noise_rate(&self) -> f64 {
		self.noise_rate
	}

	pub fn key_sub_prob(&self) -> f64 {
		self.key_sub_prob
	}

	pub fn missing_letter_prob(&self) -> f64 {
		self.missing_letter_prob
	}

	pub fn extra_letter_prob(&self) -> f64 {
		self.extra_letter_prob
	}

	pub fn clean_variants_per_word(&self) -> usize {
		self.clean_variants_per_word
	}

	pub fn min_word_length(&self) -> usize {
		self.min_word_length
	}

	pub fn max_word_length(&self) -> usize {
		self.max_word_length
	}

	pub fn output_file(&self) -> &Path {
		&self.output_file
	}

	pub fn seed(&self) -> u64 {
		self.seed
	}

	/// Sets the vocabulary size (>= 1).
	pub fn set_target_vocab_size(&mut self, value: usize) -> Result<(), ConfigError> {
		self.target_vocab_size = check_positive("TARGET_VOCAB_SIZE", value)?;
		Ok(())
	}

	/// Sets the noisy-draw success probability (0.0..=1.0).
	pub fn set_noise_rate(&mut self, value: f64) -> Result<(), ConfigError> {
		self.noise_rate = check_probability("NOISE_RATE", value)?;
		Ok(())
	}

	/// Sets the key substitution probability (0.0..=1.0).
	pub fn set_key_sub_prob(&mut self, value: f64) -> Result<(), ConfigError> {
		self.key_sub_prob = check_probability("KEY_SUB_PROB", value)?;
		Ok(())
	}

	/// Sets the missing letter probability (0.0..=1.0).
	pub fn set_missing_letter_prob(&mut self, value: f64) -> Result<(), ConfigError> {
		self.missing_letter_prob = check_probability("MISSING_LETTER_PROB", value)?;
		Ok(())
	}

	/// Sets the extra letter probability (0.0..=1.0).
	pub fn set_extra_letter_prob(&mut self, value: f64) -> Result<(), ConfigError> {
		self.extra_letter_prob = check_probability("EXTRA_LETTER_PROB", value)?;
		Ok(())
	}

	/// Sets the number of clean variants per word (>= 1).
	pub fn set_clean_variants_per_word(&mut self, value: usize) -> Result<(), ConfigError> {
		self.clean_variants_per_word = check_positive("CLEAN_VARIANTS_PER_WORD", value)?;
		Ok(())
	}

	/// Sets the accepted word length range.
	pub fn set_word_length_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
		check_positive("MIN_WORD_LENGTH", min)?;
		if min > max {
			return Err(ConfigError::LengthBounds { min, max });
		}
		self.min_word_length = min;
		self.max_word_length = max;
		Ok(())
	}

	pub fn set_output_file<P: Into<PathBuf>>(&mut self, path: P) {
		self.output_file = path.into();
	}

	pub fn set_seed(&mut self, seed: u64) {
		self.seed = seed;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let config = GenerationConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.max_examples_per_word(), 10);
		assert_eq!(config.output_file(), Path::new("chord_dataset.csv"));
	}

	#[test]
	fn test_setters_reject_out_of_range() {
		let mut config = GenerationConfig::default();
		assert!(config.set_noise_rate(1.5).is_err());
		assert!(config.set_key_sub_prob(-0.1).is_err());
		assert!(config.set_missing_letter_prob(f64::NAN).is_err());
		assert!(config.set_clean_variants_per_word(0).is_err());
		assert!(config.set_word_length_bounds(5, 4).is_err());
		assert_eq!(config, GenerationConfig::default());

		config.set_noise_rate(1.0).unwrap();
		assert_eq!(config.noise_rate(), 1.0);
	}

	#[test]
	fn test_from_json_partial_override() {
		let config = GenerationConfig::from_json(r#"{"NOISE_RATE": 0.25, "SEED": 7}"#).unwrap();
		assert_eq!(config.noise_rate(), 0.25);
		assert_eq!(config.seed(), 7);
		assert_eq!(config.clean_variants_per_word(), 3);
	}

	#[test]
	fn test_from_json_rejects_invalid() {
		let err = GenerationConfig::from_json(r#"{"EXTRA_LETTER_PROB": 2.0}"#).unwrap_err();
		assert!(matches!(
			err,
			crate::ChordGenError::Config(ConfigError::Probability { name: "EXTRA_LETTER_PROB", .. })
		));
		let err = GenerationConfig::from_json(r#"{"CLEAN_VARIANTS_PER_WORD": 0}"#).unwrap_err();
		assert!(matches!(err, crate::ChordGenError::Config(ConfigError::NonPositive { .. })));
	}

	#[test]
	fn test_plain_deserialization_validates() {
		assert!(serde_json::from_str::<GenerationConfig>(r#"{"NOISE_RATE": 2.0}"#).is_err());
		assert!(serde_json::from_str::<GenerationConfig>(r#"{"CLEAN_VARIANTS_PER_WORD": 0}"#).is_err());
		let config: GenerationConfig = serde_json::from_str(r#"{"NOISE_RATE": 1.0}"#).unwrap();
		assert_eq!(config.noise_rate(), 1.0);
	}

	#[test]
	fn test_serialization_round_trips_through_validation() {
		let json = serde_json::to_string(&GenerationConfig::default()).unwrap();
		assert!(json.contains("\"NOISE_RATE\":0.4"));
		assert_eq!(GenerationConfig::from_json(&json).unwrap(), GenerationConfig::default());
	}

	#[test]
	fn test_from_json_rejects_unknown_key() {
		assert!(GenerationConfig::from_json(r#"{"BOUNDARY_SHIFT_PROB": 0.25}"#).is_err());
	}
}
