use rand::Rng;
use rand::seq::IndexedRandom;

use super::generation_config::GenerationConfig;

/// QWERTY neighbours of each letter, indexed by `letter - 'a'`.
///
/// Horizontal and diagonal neighbours on a standard layout. Read-only.
static KEYBOARD_ADJACENCY: [&str; 26] = [
	"sqwz",  // a
	"vghn",  // b
	"xdfv",  // c
	"erfcs", // d
	"wrsdf", // e
	"rtgdc", // f
	"tyhfe", // g
	"yugnj", // h
	"uojkl", // i
	"uihnkm", // j
	"iolmj", // k
	"opk",   // l
	"nkj",   // m
	"bhjm",  // n
	"iplk",  // o
	"ol",    // p
	"wa",    // q
	"etdf",  // r
	"wedza", // s
	"ryfg",  // t
	"yhij",  // u
	"cfgb",  // v
	"qase",  // w
	"zsdc",  // x
	"tunh",  // y
	"asx",   // z
];

/// Returns the keys adjacent to `letter`, or an empty slice for non-letters.
pub fn neighbours(letter: char) -> &'static [u8] {
	let lower = letter.to_ascii_lowercase();
	if lower.is_ascii_lowercase() {
		KEYBOARD_ADJACENCY[(lower as u8 - b'a') as usize].as_bytes()
	} else {
		&[]
	}
}

/// One corruption rule applied to a single syllable.
///
/// Each rule has an applicability predicate; applying an inapplicable rule
/// returns the syllable unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseRule {
	/// Replace one letter by a QWERTY neighbour.
	KeySubstitution,
	/// Drop one letter (never empties the syllable).
	MissingLetter,
	/// Type one letter twice.
	ExtraLetter,
}

impl NoiseRule {
	/// Application order when several rules fire on the same syllable.
	pub const ORDER: [NoiseRule; 3] = [NoiseRule::KeySubstitution, NoiseRule::MissingLetter, NoiseRule::ExtraLetter];

	/// Whether the rule can change `syllable` at all.
	pub fn is_applicable(&self, syllable: &str) -> bool {
		match self {
			NoiseRule::KeySubstitution => syllable.chars().any(|c| !neighbours(c).is_empty()),
			NoiseRule::MissingLetter => syllable.chars().count() > 1,
			NoiseRule::ExtraLetter => !syllable.is_empty(),
		}
	}

	/// Applies the rule at a uniformly chosen position.
	///
	/// # Notes
	/// - Key substitution picks the position among all letters; a letter
	///   without neighbours leaves the syllable unchanged.
	/// - Draws from `rng` only when the rule is applicable.
	pub fn apply<R: Rng + ?Sized>(&self, syllable: &str, rng: &mut R) -> String {
		if !self.is_applicable(syllable) {
			return syllable.to_owned();
		}

		let mut chars: Vec<char> = syllable.chars().collect();
		let idx = rng.random_range(0..chars.len());
		match self {
			NoiseRule::KeySubstitution => {
				if let Some(&key) = neighbours(chars[idx]).choose(rng) {
					chars[idx] = key as char;
				}
			}
			NoiseRule::MissingLetter => {
				chars.remove(idx);
			}
			NoiseRule::ExtraLetter => {
				chars.insert(idx, chars[idx]);
			}
		}
		chars.into_iter().collect()
	}
}

/// Corrupts syllables to imitate real typing mistakes.
///
/// Every syllable gets three independent draws (substitution, missing,
/// extra), applied in that order on the already modified syllable.
///
/// # Invariants
/// - Output syllables are never empty
/// - Output syllables stay alphabetic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseInjector {
	key_sub_prob: f64,
	missing_letter_prob: f64,
	extra_letter_prob: f64,
}

impl NoiseInjector {
	/// Builds an injector from a validated configuration.
	pub fn new(config: &GenerationConfig) -> Self {
		Self {
			key_sub_prob: config.key_sub_prob(),
			missing_letter_prob: config.missing_letter_prob(),
			extra_letter_prob: config.extra_letter_prob(),
		}
	}

	fn probability(&self, rule: NoiseRule) -> f64 {
		match rule {
			NoiseRule::KeySubstitution => self.key_sub_prob,
			NoiseRule::MissingLetter => self.missing_letter_prob,
			NoiseRule::ExtraLetter => self.extra_letter_prob,
		}
	}

	/// Corrupts one syllable.
	pub fn corrupt_syllable<R: Rng + ?Sized>(&self, syllable: &str, rng: &mut R) -> String {
		let mut current = syllable.to_owned();
		for rule in NoiseRule::ORDER {
			if rng.random_bool(self.probability(rule)) {
				current = rule.apply(&current, rng);
			}
		}
		current
	}

	/// Corrupts every syllable of a syllabification independently.
	pub fn corrupt<S, R>(&self, syllables: &[S], rng: &mut R) -> Vec<String>
	where
		S: AsRef<str>,
		R: Rng + ?Sized,
	{
		syllables
			.iter()
			.map(|s| self.corrupt_syllable(s.as_ref(), rng))
			.collect()
	}
}
