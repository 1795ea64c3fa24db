use serde::Serialize;

/// Primary results below this count make a short query eligible for a slug lookup.
pub(crate) const SLUG_MIN_PRIMARY_HITS: usize = 3;
/// Longest normalized query, in characters, still treated as a possible acronym.
pub(crate) const SLUG_MAX_QUERY_CHARS: usize = 10;
pub(crate) const SLUG_CAP: u32 = 1;
/// Per-call cap for both fallback strategies.
pub(crate) const FALLBACK_CAP: usize = 10;
pub(crate) const FALLBACK_MAX_KEYWORDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
	PrimaryMatch,
	ExactSlugMatch,
	FallbackKeyword,
	OriginalQueryFallback,
}
impl SearchStrategy {
	pub const ALL: [Self; 4] = [
		Self::PrimaryMatch,
		Self::ExactSlugMatch,
		Self::FallbackKeyword,
		Self::OriginalQueryFallback,
	];

	/// Lower runs first.
	pub fn priority(self) -> u8 {
		match self {
			Self::PrimaryMatch => 0,
			Self::ExactSlugMatch => 1,
			Self::FallbackKeyword => 2,
			Self::OriginalQueryFallback => 3,
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::PrimaryMatch => "primary_match",
			Self::ExactSlugMatch => "exact_slug_match",
			Self::FallbackKeyword => "fallback_keyword",
			Self::OriginalQueryFallback => "original_query_fallback",
		}
	}

	/// Result-count cap for one call, given the caller's limit and the results still missing.
	pub fn cap(self, limit: usize, remaining: usize) -> usize {
		match self {
			Self::PrimaryMatch => limit,
			Self::ExactSlugMatch => SLUG_CAP as usize,
			Self::FallbackKeyword | Self::OriginalQueryFallback => FALLBACK_CAP.min(remaining),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn priorities_follow_declaration_order() {
		let priorities: Vec<u8> = SearchStrategy::ALL.iter().map(|s| s.priority()).collect();

		assert_eq!(priorities, vec![0, 1, 2, 3]);
	}

	#[test]
	fn fallback_caps_never_exceed_ten() {
		assert_eq!(SearchStrategy::FallbackKeyword.cap(50, 48), 10);
		assert_eq!(SearchStrategy::OriginalQueryFallback.cap(50, 4), 4);
		assert_eq!(SearchStrategy::ExactSlugMatch.cap(50, 50), 1);
		assert_eq!(SearchStrategy::PrimaryMatch.cap(25, 25), 25);
	}
}
