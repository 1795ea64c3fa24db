//! Identifier handling for catalog nodes and warehouse tables.

/// Strips the GraphQL node type prefix, e.g. `DatasetNode:d302...` becomes `d302...`.
///
/// Returns `None` for empty identifiers. Identifiers without a prefix are returned unchanged.
pub fn clean_node_id(node_id: &str) -> Option<&str> {
	let trimmed = node_id.trim();

	if trimmed.is_empty() {
		return None;
	}

	let cleaned = match trimmed.split_once(':') {
		Some((_, rest)) => rest,
		None => trimmed,
	};

	if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Builds `project.dataset.table` from identifiers reported by the catalog itself.
///
/// Any missing or blank part yields `None`; a guessed reference is never produced.
pub fn canonical_reference(
	project_id: Option<&str>,
	dataset_id: Option<&str>,
	table_id: Option<&str>,
) -> Option<String> {
	let project_id = project_id.map(str::trim).filter(|value| !value.is_empty())?;
	let dataset_id = dataset_id.map(str::trim).filter(|value| !value.is_empty())?;
	let table_id = table_id.map(str::trim).filter(|value| !value.is_empty())?;

	Some(format!("{project_id}.{dataset_id}.{table_id}"))
}
