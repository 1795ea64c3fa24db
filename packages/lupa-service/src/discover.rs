use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
	LupaService,
	search::{self, Enrichment, EnrichmentResult, SearchDiagnostics, SearchOutcome},
};
use lupa_domain::{catalog::CandidateRecord, query::preprocess};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverRequest {
	pub query: String,
	/// Falls back to `search.default_limit`; clamped to `search.max_limit`.
	pub limit: Option<u32>,
	#[serde(default)]
	pub thorough: bool,
	pub theme: Option<String>,
	pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverResponse {
	pub items: Vec<DiscoverItem>,
	pub diagnostics: SearchDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverItem {
	/// 1-based position after ranking.
	pub rank: u32,
	pub candidate: CandidateRecord,
	pub table_count: usize,
	pub total_columns: u64,
	pub sample_tables: Vec<String>,
	/// Only set in thorough mode, and only when the batched fetch finished in budget.
	pub enrichment: Option<EnrichmentResult>,
}
impl DiscoverItem {
	fn new(rank: u32, candidate: CandidateRecord) -> Self {
		Self {
			rank,
			table_count: candidate.table_count(),
			total_columns: candidate.total_columns(),
			sample_tables: candidate.sample_tables(),
			candidate,
			enrichment: None,
		}
	}
}

impl LupaService {
	/// Finds, ranks and optionally enriches datasets matching `req.query`.
	///
	/// Never fails: remote errors and timeouts reduce the result set and are reported in
	/// [`DiscoverResponse::diagnostics`].
	pub async fn discover(&self, req: DiscoverRequest) -> DiscoverResponse {
		let search_cfg = &self.cfg.search;
		let requested = req.limit.unwrap_or(search_cfg.default_limit);
		let limit = requested.min(search_cfg.max_limit);

		if limit == 0 {
			let mut diagnostics = SearchDiagnostics::new(&req.query, &preprocess(&req.query));

			diagnostics.note("Result limit is zero; no search was run.");

			return DiscoverResponse { items: Vec::new(), diagnostics };
		}

		let SearchOutcome { candidates, mut diagnostics, .. } = search::search_candidates(
			self.sources.search.as_ref(),
			&self.cfg.metadata,
			&req.query,
			limit,
		)
		.await;

		if requested > limit {
			diagnostics.note(format!("Requested limit {requested} was clamped to {limit}."));
		}

		let found = candidates.len();
		let filtered = apply_filters(candidates, req.theme.as_deref(), req.organization.as_deref());

		if filtered.len() < found {
			diagnostics.note(format!(
				"Theme and organization filters removed {} of {found} candidates.",
				found - filtered.len()
			));
		}

		let mut items: Vec<DiscoverItem> = search::rank(&req.query, filtered)
			.into_iter()
			.zip(1..)
			.map(|(candidate, rank)| DiscoverItem::new(rank, candidate))
			.collect();

		if req.thorough && !items.is_empty() {
			self.enrich_items(&mut items, &mut diagnostics).await;
		}
		if items.is_empty() {
			diagnostics.note("No datasets matched the query.");
		}

		tracing::info!(
			query = %req.query,
			limit,
			thorough = req.thorough,
			returned = items.len(),
			"Discovery finished."
		);

		DiscoverResponse { items, diagnostics }
	}

	async fn enrich_items(&self, items: &mut [DiscoverItem], diagnostics: &mut SearchDiagnostics) {
		let take = (self.cfg.enrichment.max_candidates as usize).min(items.len());
		let ids: Vec<String> = items[..take].iter().map(|item| item.candidate.id.clone()).collect();
		let Enrichment { mut results, outcome } = search::enrich(
			self.sources.details.as_ref(),
			&self.cfg.metadata,
			&ids,
			Duration::from_millis(self.cfg.enrichment.budget_ms),
		)
		.await;

		for item in items[..take].iter_mut() {
			item.enrichment = results.remove(&item.candidate.id);
		}

		diagnostics.enrichment = Some(outcome);
	}
}

fn apply_filters(
	candidates: Vec<CandidateRecord>,
	theme: Option<&str>,
	organization: Option<&str>,
) -> Vec<CandidateRecord> {
	let theme = theme.filter(|value| !value.trim().is_empty());
	let organization = organization.filter(|value| !value.trim().is_empty());

	candidates
		.into_iter()
		.filter(|candidate| theme.is_none_or(|theme| candidate.has_theme(theme)))
		.filter(|candidate| organization.is_none_or(|org| candidate.has_organization(org)))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn filters_keep_only_matching_candidates() {
		let ibge = CandidateRecord {
			id: "a".to_string(),
			theme_names: vec!["População".to_string()],
			organization_names: vec!["IBGE".to_string()],
			..Default::default()
		};
		let inep = CandidateRecord {
			id: "b".to_string(),
			theme_names: vec!["Educação".to_string()],
			organization_names: vec!["INEP".to_string()],
			..Default::default()
		};
		let candidates = vec![ibge, inep];
		let by_theme = apply_filters(candidates.clone(), Some("educação"), None);
		let by_both = apply_filters(candidates.clone(), Some("população"), Some("ibge"));
		let blank = apply_filters(candidates.clone(), Some("  "), None);

		assert_eq!(by_theme.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
		assert_eq!(by_both.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["a"]);
		assert_eq!(blank.len(), 2);
	}
}
