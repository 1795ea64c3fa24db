//! On-demand lookups for a single dataset or table.

use serde::{Deserialize, Serialize};

use crate::{Error, LupaService, Result, search::EnrichmentResult};
use lupa_domain::{
	catalog::{ColumnInfo, DatasetRef, TableDetails},
	reference::clean_node_id,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOverview {
	pub id: String,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub dataset: DatasetRef,
	/// `project.dataset.table`, present only when the catalog reported every part.
	pub canonical_reference: Option<String>,
	pub column_count: usize,
	pub columns: Vec<ColumnInfo>,
}
impl From<TableDetails> for TableOverview {
	fn from(table: TableDetails) -> Self {
		let canonical_reference = table.canonical_reference();

		Self {
			id: table.id,
			name: table.name,
			slug: table.slug,
			description: table.description,
			dataset: table.dataset,
			canonical_reference,
			column_count: table.columns.len(),
			columns: table.columns,
		}
	}
}

impl LupaService {
	/// Structural detail for one dataset, for callers whose thorough pass came back empty.
	///
	/// Returns `Ok(None)` when the catalog does not know the id.
	pub async fn dataset_details(&self, dataset_id: &str) -> Result<Option<EnrichmentResult>> {
		let id = required_id(dataset_id, "dataset_id")?;
		let ids = [id.to_string()];
		let mut structures = self.sources.details.batch_details(&self.cfg.metadata, &ids).await?;

		Ok(structures.remove(id).map(EnrichmentResult::from))
	}

	/// Every column of one table, with names, types and descriptions.
	pub async fn table_details(&self, table_id: &str) -> Result<Option<TableOverview>> {
		let id = required_id(table_id, "table_id")?;
		let table = self.sources.details.table_details(&self.cfg.metadata, id).await?;

		tracing::debug!(table_id = id, found = table.is_some(), "Table lookup finished.");

		Ok(table.map(TableOverview::from))
	}
}

fn required_id<'a>(raw: &'a str, field: &str) -> Result<&'a str> {
	clean_node_id(raw)
		.ok_or_else(|| Error::InvalidRequest { message: format!("{field} must not be empty.") })
}
