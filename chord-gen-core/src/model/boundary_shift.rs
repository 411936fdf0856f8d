/// Letters treated as vowels. Every other letter, `y` included, is a consonant.
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

fn is_consonant(c: char) -> bool {
	c.is_ascii_alphabetic() && !VOWELS.contains(&c.to_ascii_lowercase())
}

/// Direction in which a consonant crosses a syllable boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
	/// Last letter of the left syllable moves to the front of the right one.
	Left,
	/// First letter of the right syllable moves to the end of the left one.
	Right,
}

/// Applies one shift at `boundary` (between syllables `boundary` and `boundary + 1`).
///
/// Returns `None` when the shift is not applicable:
/// - the boundary does not exist
/// - the moving letter is not a consonant
/// - the donor syllable has a single letter (it would become empty)
pub fn shift_at(syllables: &[String], boundary: usize, shift: Shift) -> Option<Vec<String>> {
	let left = syllables.get(boundary)?;
	let right = syllables.get(boundary + 1)?;

	let (new_left, new_right) = match shift {
		Shift::Left => {
			let moving = left.chars().last()?;
			if left.chars().count() <= 1 || !is_consonant(moving) {
				return None;
			}
			let kept = &left[..left.len() - moving.len_utf8()];
			(kept.to_owned(), format!("{moving}{right}"))
		}
		Shift::Right => {
			let moving = right.chars().next()?;
			if right.chars().count() <= 1 || !is_consonant(moving) {
				return None;
			}
			(format!("{left}{moving}"), right[moving.len_utf8()..].to_owned())
		}
	};

	if new_left.is_empty() || new_right.is_empty() {
		return None;
	}

	let mut candidate = syllables.to_vec();
	candidate[boundary] = new_left;
	candidate[boundary + 1] = new_right;
	Some(candidate)
}

/// Derives alternative syllabifications by shifting one boundary consonant.
///
/// # Order
/// Boundaries are visited left to right; at each boundary the left shift is
/// tried before the right shift. The first `cap` distinct candidates win.
///
/// # Returns
/// Candidates that differ from `canonical` and from each other, at most `cap`.
/// A single-syllable `canonical` yields no candidate.
pub fn shift_variants(canonical: &[String], cap: usize) -> Vec<Vec<String>> {
	let mut variants: Vec<Vec<String>> = Vec::new();
	if cap == 0 {
		return variants;
	}

	for boundary in 0..canonical.len().saturating_sub(1) {
		for shift in [Shift::Left, Shift::Right] {
			let Some(candidate) = shift_at(canonical, boundary, shift) else {
				continue;
			};
			if candidate.as_slice() == canonical || variants.contains(&candidate) {
				continue;
			}
			variants.push(candidate);
			if variants.len() >= cap {
				return variants;
			}
		}
	}

	variants
}
