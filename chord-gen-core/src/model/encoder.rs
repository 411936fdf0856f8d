use std::collections::BTreeSet;

/// Separator placed between chord tokens of a sequence.
pub const CHORD_SEPARATOR: char = '-';

/// Encodes one syllable into its chord token.
///
/// A chord is what a stenographic keyboard sees when all keys of a syllable
/// are pressed at once: the set of letters, without order or repetition.
///
/// - Lowercases the input
/// - Keeps each distinct letter once
/// - Sorts letters alphabetically
///
/// # Invariants
/// - The result only depends on the set of distinct letters of `syllable`
/// - Non-empty input gives a non-empty token, never longer than the input
///
/// ```
/// use chord_gen_core::model::encoder::encode;
/// assert_eq!(encode("class"), "acls");
/// assert_eq!(encode("slacc"), "acls");
/// ```
pub fn encode(syllable: &str) -> String {
	syllable
		.chars()
		.flat_map(char::to_lowercase)
		.collect::<BTreeSet<char>>()
		.into_iter()
		.collect()
}

/// Encodes a syllable sequence into a dash-joined chord string.
///
/// Token order follows syllable order and is never collapsed.
pub fn encode_sequence<S: AsRef<str>>(syllables: &[S]) -> String {
	let mut chords = String::new();
	for (i, syllable) in syllables.iter().enumerate() {
		if i > 0 {
			chords.push(CHORD_SEPARATOR);
		}
		chords.push_str(&encode(syllable.as_ref()));
	}
	chords
}

/// Splits a word into one-letter syllables.
pub fn letters_of(word: &str) -> Vec<String> {
	word.chars().flat_map(char::to_lowercase).map(String::from).collect()
}

/// Letter-by-letter spelling of a word, e.g. `"at"` → `"a-t"`.
///
/// Encoding a single letter is the identity, so this is simply the
/// lowercase letters joined by the separator.
pub fn letter_spelling(word: &str) -> String {
	encode_sequence(&letters_of(word))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode_collapses_order_and_repetition() {
		assert_eq!(encode("class"), "acls");
		assert_eq!(encode("slacc"), encode("class"));
		assert_eq!(encode("at"), "at");
		assert_eq!(encode("ta"), "at");
		assert_eq!(encode("tion"), "inot");
	}

	#[test]
	fn test_encode_is_case_insensitive() {
		assert_eq!(encode("ClAsS"), "acls");
	}

	#[test]
	fn test_encode_single_letter_is_identity() {
		for c in 'a'..='z' {
			assert_eq!(encode(&c.to_string()), c.to_string());
		}
	}

	#[test]
	fn test_encode_sequence_keeps_order() {
		let syllables = ["clas", "si", "fi", "ca", "tion"];
		assert_eq!(encode_sequence(&syllables), "acls-is-fi-ac-inot");
		assert_ne!(encode_sequence(&["ab", "c"]), encode_sequence(&["c", "ab"]));
	}

	#[test]
	fn test_letter_spelling_token_count() {
		for word in ["at", "classification", "banana"] {
			let spelled = letter_spelling(word);
			let tokens: Vec<&str> = spelled.split(CHORD_SEPARATOR).collect();
			assert_eq!(tokens.len(), word.len());
			assert!(tokens.iter().all(|t| t.len() == 1));
		}
		assert_eq!(letter_spelling("at"), "a-t");
	}
}
