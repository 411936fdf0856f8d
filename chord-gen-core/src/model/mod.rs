//! Top-level module for chord dataset generation.
//!
//! Leaf-first:
//! - Chord encoding of syllables (`encoder`)
//! - Boundary-shifted syllabifications (`boundary_shift`)
//! - Typing-noise injection (`noise`)
//! - Per-word variant composition and deduplication (`composer`)
//! - Run configuration (`generation_config`)
//! - External collaborators: vocabulary and syllabifier
//! - Whole-vocabulary assembly and CSV output (`generator`)

/// Lossy chord encoding: distinct letters of a syllable, sorted.
pub mod encoder;

/// Alternative splits obtained by moving one consonant across a boundary.
pub mod boundary_shift;

/// QWERTY substitution, missing and extra letter noise.
///
/// Randomness is always supplied by the caller.
pub mod noise;

/// Per-word driver: letter spelling, clean variants, noisy draws, dedup.
pub mod composer;

/// Validated generation parameters, loadable from JSON.
pub mod generation_config;

/// Frequency-ranked vocabulary loading and filtering.
pub mod vocabulary;

/// Canonical syllabification sources.
pub mod syllabifier;

/// Parallel, seed-reproducible dataset assembly and CSV writing.
pub mod generator;
