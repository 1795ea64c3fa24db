use std::cmp::Ordering;

use super::scoring;
use lupa_domain::catalog::CandidateRecord;

/// Orders candidates by descending relevance. Equal scores keep their incoming order.
pub fn rank(query: &str, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
	let mut scored: Vec<(f64, CandidateRecord)> = candidates
		.into_iter()
		.map(|candidate| (scoring::score(query, &candidate), candidate))
		.collect();

	// `sort_by` is stable.
	scored.sort_by(|a, b| cmp_score_desc(a.0, b.0));

	scored.into_iter().map(|(_, candidate)| candidate).collect()
}

pub fn cmp_score_desc(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
