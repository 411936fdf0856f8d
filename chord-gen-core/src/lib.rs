//! Chord-to-word training dataset generation.
//!
//! This crate turns a frequency-ranked vocabulary into a labeled corpus of
//! lossy "chord" encodings, including:
//! - Chord encoding of syllables (deduplicated, sorted letters)
//! - Alternative syllabifications by shifting boundary consonants
//! - Typing-noise injection driven by an explicit random source
//! - Per-word variant composition with chord-string deduplication
//! - Parallel, seed-reproducible dataset assembly and CSV output
//!
//! Only the high-level API is exposed publicly. File helpers are kept
//! internal.

/// Chord encoding, variant generation and dataset assembly.
///
/// Every stage that needs entropy takes the random source as an argument,
/// so a fixed seed reproduces the whole dataset.
pub mod model;

/// Error types (`ChordGenError`, `ConfigError`, `SkipReason`).
pub mod error;

/// I/O utilities (line reading, cache paths, atomic CSV writing).
///
/// Not exposed
pub(crate) mod io;

pub use error::{ChordGenError, ConfigError, Result, SkipReason};
