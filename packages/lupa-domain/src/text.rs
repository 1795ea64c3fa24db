use unicode_normalization::UnicodeNormalization;

/// Canonically composes `input` so decomposed accents behave like their precomposed letters.
pub fn compose(input: &str) -> String {
	input.nfc().collect()
}

/// Replaces every character outside letters, digits, whitespace and `-` with a space, collapses
/// whitespace runs and trims both ends.
pub fn sanitize(input: &str) -> String {
	let mut cleaned = String::with_capacity(input.len());

	for ch in input.chars() {
		if ch.is_alphanumeric() || ch.is_whitespace() || ch == '-' {
			cleaned.push(ch);
		} else {
			cleaned.push(' ');
		}
	}

	collapse_whitespace(&cleaned)
}

pub fn collapse_whitespace(input: &str) -> String {
	input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in characters, not bytes.
pub fn char_len(input: &str) -> usize {
	input.chars().count()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_punctuation_and_collapses_spaces() {
		assert_eq!(sanitize("  população,  do Brasil!! "), "população do Brasil");
		assert_eq!(sanitize("renda\t\tper-capita (2010)"), "renda per-capita 2010");
	}

	#[test]
	fn drops_underscores_and_symbols() {
		assert_eq!(sanitize("br_ibge_censo"), "br ibge censo");
		assert_eq!(sanitize("$%&*"), "");
	}

	#[test]
	fn composes_decomposed_accents() {
		let decomposed = "popula\u{0063}\u{0327}a\u{0303}o";

		assert_eq!(compose(decomposed), "população");
		assert_eq!(sanitize(&compose(decomposed)), "população");
	}

	#[test]
	fn counts_characters() {
		assert_eq!(char_len("ção"), 3);
	}
}
