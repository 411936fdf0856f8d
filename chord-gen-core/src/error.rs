use std::path::PathBuf;

/// Result type used across the crate.
///
/// Defaults the error type to [`ChordGenError`].
pub type Result<T, E = ChordGenError> = std::result::Result<T, E>;

/// Top-level error of the dataset generator.
///
/// Only configuration problems and collaborator I/O failures surface here.
/// Per-word data quirks never do: they are reported as [`SkipReason`] and
/// the word is dropped.
#[derive(Debug, thiserror::Error)]
pub enum ChordGenError {
	/// Invalid configuration, fatal at startup.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A collaborator file could not be parsed.
	#[error("invalid format in {path}: {msg}")]
	InvalidFormat {
		path: PathBuf,
		msg: String,
	},

	/// Standard I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Binary cache (de)serialization error.
	#[error(transparent)]
	Serialization(#[from] postcard::Error),

	/// JSON configuration parsing error.
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Configuration value rejected by validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
	/// A probability outside `[0.0, 1.0]` (NaN included).
	#[error("{name} must be between 0.0 and 1.0, got {value}")]
	Probability {
		name: &'static str,
		value: f64,
	},

	/// A count that must be strictly positive.
	#[error("{name} must be at least 1")]
	NonPositive {
		name: &'static str,
	},

	/// Word length bounds that do not form a range.
	#[error("MIN_WORD_LENGTH ({min}) must not exceed MAX_WORD_LENGTH ({max})")]
	LengthBounds {
		min: usize,
		max: usize,
	},
}

/// Why a word produced no examples.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
	#[error("empty syllabification")]
	EmptySyllabification,

	#[error("empty syllable at position {0}")]
	EmptySyllable(usize),

	#[error("non-alphabetic syllable {0:?}")]
	NonAlphabetic(String),

	#[error("syllables {joined:?} do not spell {word:?}")]
	Mismatch {
		word: String,
		joined: String,
	},
}
