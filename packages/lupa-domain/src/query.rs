//! Query preprocessing: sanitize, restore accents, extract fallback keywords.

use serde::{Deserialize, Serialize};

use crate::{accents, text};

pub const MAX_FALLBACK_KEYWORDS: usize = 4;
/// Tokens this short never become fallback keywords.
pub const MIN_KEYWORD_CHARS: usize = 3;

/// Portuguese and English articles, prepositions and conjunctions.
pub const STOP_WORDS: &[&str] = &[
	"de", "da", "do", "das", "dos", "e", "em", "na", "no", "nas", "nos", "para", "por", "com",
	"sem", "sobre", "entre", "the", "and", "or", "of", "in", "to",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuery {
	/// Full normalized string used for the primary and slug searches.
	pub text: String,
	/// Up to four tokens, in query order, used only when primary search underperforms.
	pub fallback_keywords: Vec<String>,
}
impl NormalizedQuery {
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}
}

pub fn preprocess(raw_query: &str) -> NormalizedQuery {
	if raw_query.trim().is_empty() {
		return NormalizedQuery::default();
	}

	let cleaned = text::sanitize(&text::compose(raw_query));
	let normalized = accents::normalize_accents(&cleaned);
	let fallback_keywords = normalized
		.split_whitespace()
		.filter(|token| text::char_len(token) >= MIN_KEYWORD_CHARS)
		.filter(|token| !is_stop_word(token))
		.take(MAX_FALLBACK_KEYWORDS)
		.map(str::to_string)
		.collect();

	NormalizedQuery { text: normalized, fallback_keywords }
}

pub fn is_stop_word(token: &str) -> bool {
	let lowered = token.to_lowercase();

	STOP_WORDS.contains(&lowered.as_str())
}
