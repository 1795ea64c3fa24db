use std::{
	collections::HashMap,
	time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tokio::time;

use super::diagnostics::EnrichmentOutcome;
use crate::{CatalogDetails, Error};
use lupa_config::MetadataProviderConfig;
use lupa_domain::catalog::{DatasetStructure, TableStructure};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
	pub id: String,
	pub tables: Vec<EnrichedTable>,
	pub organizations: Vec<String>,
	pub themes: Vec<String>,
	pub tags: Vec<String>,
}
impl From<DatasetStructure> for EnrichmentResult {
	fn from(structure: DatasetStructure) -> Self {
		Self {
			id: structure.id,
			tables: structure.tables.into_iter().map(EnrichedTable::from).collect(),
			organizations: structure.organization_names,
			themes: structure.theme_names,
			tags: structure.tag_names,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTable {
	pub name: String,
	pub slug: String,
	/// `project.dataset.table`, present only when the catalog reported every part.
	pub canonical_reference: Option<String>,
	pub column_count: u32,
}
impl From<TableStructure> for EnrichedTable {
	fn from(table: TableStructure) -> Self {
		let canonical_reference = table.canonical_reference();

		Self {
			name: table.name,
			slug: table.slug,
			canonical_reference,
			column_count: table.column_count,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
	/// Empty unless the fetch completed within budget.
	pub results: HashMap<String, EnrichmentResult>,
	pub outcome: EnrichmentOutcome,
}

/// Fetches structure for `ids` in one batch, abandoning the call once `budget` elapses.
///
/// Never fails. A timeout or provider error yields an empty mapping and is reported through
/// [`Enrichment::outcome`]; callers fetch details per item afterwards.
pub async fn enrich(
	details: &dyn CatalogDetails,
	cfg: &MetadataProviderConfig,
	ids: &[String],
	budget: Duration,
) -> Enrichment {
	let budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);

	if ids.is_empty() {
		return Enrichment {
			results: HashMap::new(),
			outcome: EnrichmentOutcome::Completed { requested: 0, returned: 0, elapsed_ms: 0 },
		};
	}

	let started = Instant::now();
	let fetched = match time::timeout(budget, details.batch_details(cfg, ids)).await {
		Ok(result) => result,
		Err(_) => Err(Error::Timeout { budget_ms }),
	};
	let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

	match fetched {
		Ok(structures) => {
			let results: HashMap<String, EnrichmentResult> = structures
				.into_iter()
				.map(|(id, structure)| (id, EnrichmentResult::from(structure)))
				.collect();

			tracing::info!(
				requested = ids.len(),
				returned = results.len(),
				elapsed_ms,
				"Enrichment completed."
			);

			let outcome = EnrichmentOutcome::Completed {
				requested: ids.len(),
				returned: results.len(),
				elapsed_ms,
			};

			Enrichment { results, outcome }
		},
		Err(Error::Timeout { budget_ms }) => {
			tracing::warn!(budget_ms, elapsed_ms, "Enrichment timed out.");

			Enrichment {
				results: HashMap::new(),
				outcome: EnrichmentOutcome::TimedOut { budget_ms, elapsed_ms },
			}
		},
		Err(err) => {
			tracing::warn!(error = %err, elapsed_ms, "Enrichment failed.");

			Enrichment {
				results: HashMap::new(),
				outcome: EnrichmentOutcome::Failed { error: err.to_string(), elapsed_ms },
			}
		},
	}
}
