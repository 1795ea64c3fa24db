use serde::{Deserialize, Serialize};

use crate::reference;

/// Sample table names listed per result before collapsing the rest into a count.
pub const SAMPLE_TABLES: usize = 3;

/// A dataset as returned by catalog search. Identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
	pub id: String,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub organization_names: Vec<String>,
	pub theme_names: Vec<String>,
	pub tag_names: Vec<String>,
	pub table_summaries: Vec<TableSummary>,
}
impl CandidateRecord {
	/// Organization names joined the way they are displayed, e.g. `IBGE, Ministério da Saúde`.
	pub fn organizations_text(&self) -> String {
		self.organization_names.join(", ")
	}

	pub fn table_count(&self) -> usize {
		self.table_summaries.len()
	}

	pub fn total_columns(&self) -> u64 {
		self.table_summaries.iter().map(|table| u64::from(table.column_count)).sum()
	}

	/// First [`SAMPLE_TABLES`] table names, followed by `... and N more` when tables remain.
	pub fn sample_tables(&self) -> Vec<String> {
		let mut out: Vec<String> = self
			.table_summaries
			.iter()
			.take(SAMPLE_TABLES)
			.map(|table| table.name.clone())
			.collect();

		if self.table_summaries.len() > SAMPLE_TABLES {
			out.push(format!("... and {} more", self.table_summaries.len() - SAMPLE_TABLES));
		}

		out
	}

	pub fn has_theme(&self, theme: &str) -> bool {
		contains_ignore_case(&self.theme_names, theme)
	}

	pub fn has_organization(&self, organization: &str) -> bool {
		contains_ignore_case(&self.organization_names, organization)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
	pub name: String,
	pub slug: String,
	pub column_count: u32,
}

/// Structural detail for one dataset, as reported by the batched details fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStructure {
	pub id: String,
	pub tables: Vec<TableStructure>,
	pub organization_names: Vec<String>,
	pub theme_names: Vec<String>,
	pub tag_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStructure {
	pub name: String,
	pub slug: String,
	pub column_count: u32,
	pub cloud_tables: Vec<CloudTableIds>,
}
impl TableStructure {
	/// Reference from the first cloud table carrying a complete set of identifiers.
	pub fn canonical_reference(&self) -> Option<String> {
		self.cloud_tables.iter().find_map(CloudTableIds::canonical_reference)
	}
}

/// Warehouse identifiers exactly as the catalog reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudTableIds {
	pub gcp_project_id: Option<String>,
	pub gcp_dataset_id: Option<String>,
	pub gcp_table_id: Option<String>,
}
impl CloudTableIds {
	pub fn canonical_reference(&self) -> Option<String> {
		reference::canonical_reference(
			self.gcp_project_id.as_deref(),
			self.gcp_dataset_id.as_deref(),
			self.gcp_table_id.as_deref(),
		)
	}
}

/// One table with its full column listing, as returned by the per-table lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDetails {
	pub id: String,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub dataset: DatasetRef,
	pub columns: Vec<ColumnInfo>,
	pub cloud_tables: Vec<CloudTableIds>,
}
impl TableDetails {
	pub fn canonical_reference(&self) -> Option<String> {
		self.cloud_tables.iter().find_map(CloudTableIds::canonical_reference)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
	pub id: String,
	pub name: String,
	pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	/// Warehouse type name such as `STRING` or `INT64`.
	pub data_type: Option<String>,
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
	let needle = needle.trim().to_lowercase();

	values.iter().any(|value| value.to_lowercase() == needle)
}
