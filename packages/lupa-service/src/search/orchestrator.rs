//! Multi-strategy candidate retrieval.
//!
//! Strategies run sequentially in priority order against one accumulator. Each strategy appends
//! only ids it has not seen, except the exact slug lookup, whose hits go to the front. Every
//! strategy is skipped once the accumulator holds `limit` records, and a failing remote call only
//! costs that strategy's contribution.

use std::collections::HashSet;

use super::{
	diagnostics::SearchDiagnostics,
	strategy::{
		FALLBACK_MAX_KEYWORDS, SLUG_MAX_QUERY_CHARS, SLUG_MIN_PRIMARY_HITS, SearchStrategy,
	},
};
use crate::CatalogSearch;
use lupa_config::MetadataProviderConfig;
use lupa_domain::{
	catalog::CandidateRecord,
	query::{NormalizedQuery, preprocess},
	text,
};

const LIMIT_REACHED: &str = "Result limit reached.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
	pub query: NormalizedQuery,
	/// Unique by id, at most `limit` long, in accumulation order.
	pub candidates: Vec<CandidateRecord>,
	pub diagnostics: SearchDiagnostics,
}

pub async fn search_candidates(
	search: &dyn CatalogSearch,
	cfg: &MetadataProviderConfig,
	raw_query: &str,
	limit: u32,
) -> SearchOutcome {
	let query = preprocess(raw_query);
	let mut run = Run {
		search,
		cfg,
		limit: limit as usize,
		found: Vec::new(),
		seen: HashSet::new(),
		diagnostics: SearchDiagnostics::new(raw_query, &query),
	};

	run.primary(&query).await;
	run.exact_slug(&query).await;
	run.fallback_keywords(&query).await;
	run.original_query(raw_query, &query).await;

	tracing::debug!(
		query = raw_query,
		normalized = %query.text,
		found = run.found.len(),
		"Candidate search finished."
	);

	SearchOutcome { query, candidates: run.found, diagnostics: run.diagnostics }
}

struct Run<'a> {
	search: &'a dyn CatalogSearch,
	cfg: &'a MetadataProviderConfig,
	limit: usize,
	found: Vec<CandidateRecord>,
	seen: HashSet<String>,
	diagnostics: SearchDiagnostics,
}
impl Run<'_> {
	fn remaining(&self) -> usize {
		self.limit.saturating_sub(self.found.len())
	}

	fn skip(&mut self, strategy: SearchStrategy, reason: &str) {
		tracing::debug!(strategy = strategy.label(), reason, "Search strategy skipped.");

		self.diagnostics.record_skipped(strategy, reason);
	}

	async fn primary(&mut self, query: &NormalizedQuery) {
		let strategy = SearchStrategy::PrimaryMatch;

		if self.remaining() == 0 {
			return self.skip(strategy, LIMIT_REACHED);
		}
		if query.is_empty() {
			return self.skip(strategy, "Normalized query is empty.");
		}

		self.attempt(strategy, &query.text).await;
	}

	async fn exact_slug(&mut self, query: &NormalizedQuery) {
		let strategy = SearchStrategy::ExactSlugMatch;

		if self.remaining() == 0 {
			return self.skip(strategy, LIMIT_REACHED);
		}
		if self.found.len() >= SLUG_MIN_PRIMARY_HITS {
			return self.skip(strategy, "Primary match returned enough results.");
		}
		if query.is_empty() {
			return self.skip(strategy, "Normalized query is empty.");
		}
		if text::char_len(query.text.trim()) > SLUG_MAX_QUERY_CHARS {
			return self.skip(strategy, "Query is too long to be a slug.");
		}

		let slug = query.text.to_lowercase();

		self.attempt(strategy, &slug).await;
	}

	async fn fallback_keywords(&mut self, query: &NormalizedQuery) {
		let strategy = SearchStrategy::FallbackKeyword;
		let threshold = 5.max(self.limit / 4);

		if self.remaining() == 0 {
			return self.skip(strategy, LIMIT_REACHED);
		}
		if self.found.len() >= threshold {
			return self.skip(strategy, "Enough results accumulated.");
		}
		if query.fallback_keywords.is_empty() {
			return self.skip(strategy, "No fallback keywords.");
		}

		for keyword in query.fallback_keywords.iter().take(FALLBACK_MAX_KEYWORDS) {
			if self.remaining() == 0 {
				self.skip(strategy, LIMIT_REACHED);

				break;
			}

			self.attempt(strategy, keyword).await;
		}
	}

	async fn original_query(&mut self, raw_query: &str, query: &NormalizedQuery) {
		let strategy = SearchStrategy::OriginalQueryFallback;
		let threshold = 3.max(self.limit / 5);
		let trimmed = raw_query.trim();

		if self.remaining() == 0 {
			return self.skip(strategy, LIMIT_REACHED);
		}
		if self.found.len() >= threshold {
			return self.skip(strategy, "Enough results accumulated.");
		}
		if trimmed.is_empty() {
			return self.skip(strategy, "Raw query is empty.");
		}
		if raw_query == query.text {
			return self.skip(strategy, "Raw query equals the normalized query.");
		}

		self.attempt(strategy, trimmed).await;
	}

	async fn attempt(&mut self, strategy: SearchStrategy, input: &str) {
		let cap = u32::try_from(strategy.cap(self.limit, self.remaining())).unwrap_or(u32::MAX);
		let fetched = match strategy {
			SearchStrategy::ExactSlugMatch => self.search.lookup_exact(self.cfg, input, cap).await,
			_ => self.search.search(self.cfg, input, cap).await,
		};
		let records = match fetched {
			Ok(records) => records,
			Err(err) => {
				tracing::warn!(
					error = %err,
					strategy = strategy.label(),
					input,
					cap,
					"Search strategy failed."
				);
				self.diagnostics.record_failed(strategy, input, cap, err.to_string());

				return;
			},
		};
		let returned = records.len();
		let added = match strategy {
			SearchStrategy::ExactSlugMatch => self.insert_front(records),
			_ => self.append(records),
		};

		tracing::debug!(
			strategy = strategy.label(),
			input,
			cap,
			returned,
			added,
			"Search strategy ran."
		);

		self.diagnostics.record_ran(strategy, input, cap, returned, added);
	}

	fn admit(&mut self, record: &CandidateRecord) -> bool {
		self.seen.insert(record.id.clone())
	}

	fn append(&mut self, records: Vec<CandidateRecord>) -> usize {
		let before = self.found.len();

		for record in records {
			if self.remaining() == 0 {
				break;
			}
			if self.admit(&record) {
				self.found.push(record);
			}
		}

		self.found.len() - before
	}

	fn insert_front(&mut self, records: Vec<CandidateRecord>) -> usize {
		let before = self.found.len();

		for record in records {
			if self.remaining() == 0 {
				break;
			}
			if self.admit(&record) {
				self.found.insert(0, record);
			}
		}

		self.found.len() - before
	}
}
