//! Dataset queries against the catalog's GraphQL API.
//!
//! Filter arguments follow the Django auto-generated schema, which uses single underscores
//! (`description_Icontains`, `id_In`).

use std::collections::HashMap;

use serde_json::Value;

use crate::{Error, Result, graphql};
use lupa_config::MetadataProviderConfig;
use lupa_domain::{
	catalog::{
		CandidateRecord, CloudTableIds, ColumnInfo, DatasetRef, DatasetStructure, TableDetails,
		TableStructure, TableSummary,
	},
	reference::clean_node_id,
};

macro_rules! candidate_fields {
	() => {
		"
fragment CandidateFields on DatasetNode {
	id
	name
	slug
	description
	organizations { edges { node { name } } }
	themes { edges { node { name } } }
	tags { edges { node { name } } }
	tables { edges { node { id name slug columns { edges { node { id } } } } } }
}"
	};
}

pub const SEARCH_QUERY: &str = concat!(
	"\
query SearchDatasets($query: String, $first: Int) {
	allDataset(description_Icontains: $query, first: $first) {
		edges { node { ...CandidateFields } }
	}
}",
	candidate_fields!()
);

pub const SLUG_QUERY: &str = concat!(
	"\
query DatasetBySlug($slug: String, $first: Int) {
	allDataset(slug: $slug, first: $first) {
		edges { node { ...CandidateFields } }
	}
}",
	candidate_fields!()
);

pub const DETAILS_QUERY: &str = "\
query DatasetDetails($ids: [ID], $first: Int) {
	allDataset(id_In: $ids, first: $first) {
		edges {
			node {
				id
				organizations { edges { node { name } } }
				themes { edges { node { name } } }
				tags { edges { node { name } } }
				tables {
					edges {
						node {
							id
							name
							slug
							columns { edges { node { id } } }
							cloudTables { edges { node { gcpProjectId gcpDatasetId gcpTableId } } }
						}
					}
				}
			}
		}
	}
}";

pub const TABLE_QUERY: &str = "\
query TableDetails($id: ID, $first: Int) {
	allTable(id: $id, first: $first) {
		edges {
			node {
				id
				name
				slug
				description
				dataset { id name slug }
				columns { edges { node { id name description bigqueryType { name } } } }
				cloudTables { edges { node { gcpProjectId gcpDatasetId gcpTableId } } }
			}
		}
	}
}";

/// Free-text match on dataset descriptions.
pub async fn search_datasets(
	cfg: &MetadataProviderConfig,
	text: &str,
	max_results: u32,
) -> Result<Vec<CandidateRecord>> {
	let variables = serde_json::json!({ "query": text, "first": max_results });
	let json = graphql::execute(cfg, SEARCH_QUERY, variables).await?;

	parse_candidates(&json)
}

/// Exact slug match.
pub async fn lookup_slug(
	cfg: &MetadataProviderConfig,
	slug: &str,
	max_results: u32,
) -> Result<Vec<CandidateRecord>> {
	let variables = serde_json::json!({ "slug": slug, "first": max_results });
	let json = graphql::execute(cfg, SLUG_QUERY, variables).await?;

	parse_candidates(&json)
}

/// Structural detail for every id in one request, keyed by cleaned dataset id.
pub async fn batch_details(
	cfg: &MetadataProviderConfig,
	ids: &[String],
) -> Result<HashMap<String, DatasetStructure>> {
	let cleaned: Vec<&str> = ids.iter().filter_map(|id| clean_node_id(id)).collect();

	if cleaned.is_empty() {
		return Ok(HashMap::new());
	}

	let variables = serde_json::json!({ "ids": cleaned, "first": cleaned.len() });
	let json = graphql::execute(cfg, DETAILS_QUERY, variables).await?;

	parse_structures(&json)
}

/// Column listing for one table. `Ok(None)` when the catalog does not know the id.
pub async fn table_details(
	cfg: &MetadataProviderConfig,
	table_id: &str,
) -> Result<Option<TableDetails>> {
	let Some(id) = clean_node_id(table_id) else {
		return Ok(None);
	};
	let variables = serde_json::json!({ "id": id, "first": 1 });
	let json = graphql::execute(cfg, TABLE_QUERY, variables).await?;

	parse_table(&json)
}

fn dataset_edges(json: &Value) -> Result<&[Value]> {
	root_edges(json, "allDataset")
}

fn root_edges<'a>(json: &'a Value, root: &str) -> Result<&'a [Value]> {
	json.get("data")
		.and_then(|data| data.get(root))
		.and_then(|all| all.get("edges"))
		.and_then(Value::as_array)
		.map(Vec::as_slice)
		.ok_or_else(|| Error::InvalidResponse {
			message: format!("Catalog response is missing data.{root}.edges."),
		})
}

fn parse_candidates(json: &Value) -> Result<Vec<CandidateRecord>> {
	let mut out = Vec::new();

	for edge in dataset_edges(json)? {
		let Some(node) = edge.get("node") else {
			tracing::warn!("Dataset edge missing node.");

			continue;
		};
		let Some(id) = node_id(node) else {
			tracing::warn!("Dataset node missing id.");

			continue;
		};
		let Some(name) = node.get("name").and_then(Value::as_str) else {
			tracing::warn!(dataset_id = %id, "Dataset node missing name.");

			continue;
		};

		out.push(CandidateRecord {
			id,
			name: name.to_string(),
			slug: string_field(node, "slug"),
			description: string_field(node, "description"),
			organization_names: connection_names(node, "organizations"),
			theme_names: connection_names(node, "themes"),
			tag_names: connection_names(node, "tags"),
			table_summaries: connection_nodes(node, "tables")
				.map(|table| TableSummary {
					name: string_field(table, "name"),
					slug: string_field(table, "slug"),
					column_count: connection_len(table, "columns"),
				})
				.collect(),
		});
	}

	Ok(out)
}

fn parse_structures(json: &Value) -> Result<HashMap<String, DatasetStructure>> {
	let mut out = HashMap::new();

	for edge in dataset_edges(json)? {
		let Some(node) = edge.get("node") else {
			tracing::warn!("Dataset edge missing node.");

			continue;
		};
		let Some(id) = node_id(node) else {
			tracing::warn!("Dataset details node missing id.");

			continue;
		};
		let tables = connection_nodes(node, "tables")
			.map(|table| TableStructure {
				name: string_field(table, "name"),
				slug: string_field(table, "slug"),
				column_count: connection_len(table, "columns"),
				cloud_tables: connection_nodes(table, "cloudTables").map(cloud_table_ids).collect(),
			})
			.collect();

		out.insert(
			id.clone(),
			DatasetStructure {
				id,
				tables,
				organization_names: connection_names(node, "organizations"),
				theme_names: connection_names(node, "themes"),
				tag_names: connection_names(node, "tags"),
			},
		);
	}

	Ok(out)
}

fn parse_table(json: &Value) -> Result<Option<TableDetails>> {
	let Some(node) = root_edges(json, "allTable")?.first().and_then(|edge| edge.get("node")) else {
		return Ok(None);
	};
	let Some(id) = node_id(node) else {
		tracing::warn!("Table node missing id.");

		return Ok(None);
	};
	let dataset = node.get("dataset").unwrap_or(&Value::Null);

	Ok(Some(TableDetails {
		id,
		name: string_field(node, "name"),
		slug: string_field(node, "slug"),
		description: string_field(node, "description"),
		dataset: DatasetRef {
			id: node_id(dataset).unwrap_or_default(),
			name: string_field(dataset, "name"),
			slug: string_field(dataset, "slug"),
		},
		columns: connection_nodes(node, "columns")
			.map(|column| ColumnInfo {
				id: node_id(column).unwrap_or_default(),
				name: string_field(column, "name"),
				description: optional_string_field(column, "description"),
				data_type: column
					.get("bigqueryType")
					.and_then(|kind| optional_string_field(kind, "name")),
			})
			.collect(),
		cloud_tables: connection_nodes(node, "cloudTables").map(cloud_table_ids).collect(),
	}))
}

fn cloud_table_ids(cloud: &Value) -> CloudTableIds {
	CloudTableIds {
		gcp_project_id: optional_string_field(cloud, "gcpProjectId"),
		gcp_dataset_id: optional_string_field(cloud, "gcpDatasetId"),
		gcp_table_id: optional_string_field(cloud, "gcpTableId"),
	}
}

fn node_id(node: &Value) -> Option<String> {
	node.get("id").and_then(Value::as_str).and_then(clean_node_id).map(str::to_string)
}

fn string_field(node: &Value, field: &str) -> String {
	optional_string_field(node, field).unwrap_or_default()
}

fn optional_string_field(node: &Value, field: &str) -> Option<String> {
	node.get(field).and_then(Value::as_str).map(str::to_string)
}

fn connection_nodes<'a>(node: &'a Value, field: &str) -> impl Iterator<Item = &'a Value> {
	node.get(field)
		.and_then(|connection| connection.get("edges"))
		.and_then(Value::as_array)
		.into_iter()
		.flatten()
		.filter_map(|edge| edge.get("node"))
}

fn connection_len(node: &Value, field: &str) -> u32 {
	u32::try_from(connection_nodes(node, field).count()).unwrap_or(u32::MAX)
}

fn connection_names(node: &Value, field: &str) -> Vec<String> {
	connection_nodes(node, field)
		.filter_map(|item| item.get("name").and_then(Value::as_str))
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_candidates_and_skips_malformed_edges() {
		let json = serde_json::json!({
			"data": {
				"allDataset": {
					"edges": [
						{
							"node": {
								"id": "DatasetNode:ds-1",
								"name": "Relação Anual de Informações Sociais (RAIS)",
								"slug": "br_me_rais",
								"description": null,
								"organizations": { "edges": [{ "node": { "name": "Ministério da Economia" } }] },
								"themes": { "edges": [{ "node": { "name": "Economia" } }] },
								"tags": { "edges": [] },
								"tables": {
									"edges": [
										{
											"node": {
												"id": "TableNode:t-1",
												"name": "Vínculos",
												"slug": "microdados_vinculos",
												"columns": { "edges": [{ "node": { "id": "c1" } }, { "node": { "id": "c2" } }] }
											}
										}
									]
								}
							}
						},
						{ "node": { "name": "No id" } },
						{ "node": { "id": "DatasetNode:ds-3" } },
						{ "cursor": "abc" }
					]
				}
			}
		});
		let candidates = parse_candidates(&json).expect("parse failed");

		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].id, "ds-1");
		assert_eq!(candidates[0].slug, "br_me_rais");
		assert_eq!(candidates[0].description, "");
		assert_eq!(candidates[0].organization_names, vec!["Ministério da Economia"]);
		assert_eq!(candidates[0].table_summaries[0].column_count, 2);
	}

	#[test]
	fn missing_edges_is_invalid_response() {
		let json = serde_json::json!({ "data": { "allDataset": null } });
		let err = parse_candidates(&json).expect_err("expected invalid response");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn parses_structures_keyed_by_clean_id() {
		let json = serde_json::json!({
			"data": {
				"allDataset": {
					"edges": [
						{
							"node": {
								"id": "DatasetNode:ds-9",
								"organizations": { "edges": [] },
								"themes": { "edges": [] },
								"tags": { "edges": [{ "node": { "name": "censo" } }] },
								"tables": {
									"edges": [
										{
											"node": {
												"name": "Município",
												"slug": "municipio",
												"columns": { "edges": [{ "node": { "id": "c1" } }] },
												"cloudTables": {
													"edges": [
														{
															"node": {
																"gcpProjectId": "basedosdados",
																"gcpDatasetId": "br_ibge_censo",
																"gcpTableId": "municipio"
															}
														}
													]
												}
											}
										}
									]
								}
							}
						}
					]
				}
			}
		});
		let structures = parse_structures(&json).expect("parse failed");
		let structure = structures.get("ds-9").expect("ds-9 missing");

		assert_eq!(structure.tag_names, vec!["censo"]);
		assert_eq!(structure.tables[0].column_count, 1);
		assert_eq!(
			structure.tables[0].canonical_reference().as_deref(),
			Some("basedosdados.br_ibge_censo.municipio")
		);
	}

	#[test]
	fn parses_table_columns_and_types() {
		let json = serde_json::json!({
			"data": {
				"allTable": {
					"edges": [
						{
							"node": {
								"id": "TableNode:t-7",
								"name": "Município",
								"slug": "municipio",
								"description": "População por município.",
								"dataset": { "id": "DatasetNode:ds-9", "name": "Censo", "slug": "br_ibge_censo" },
								"columns": {
									"edges": [
										{ "node": { "id": "ColumnNode:c1", "name": "ano", "bigqueryType": { "name": "INT64" } } },
										{ "node": { "id": "ColumnNode:c2", "name": "id_municipio", "description": "Código IBGE" } }
									]
								},
								"cloudTables": { "edges": [] }
							}
						}
					]
				}
			}
		});
		let table = parse_table(&json).expect("parse failed").expect("table missing");

		assert_eq!(table.id, "t-7");
		assert_eq!(table.dataset.id, "ds-9");
		assert_eq!(table.columns.len(), 2);
		assert_eq!(table.columns[0].data_type.as_deref(), Some("INT64"));
		assert_eq!(table.columns[1].data_type, None);
		assert_eq!(table.columns[1].description.as_deref(), Some("Código IBGE"));
		assert_eq!(table.canonical_reference(), None);
	}

	#[test]
	fn empty_table_listing_is_not_found() {
		let json = serde_json::json!({ "data": { "allTable": { "edges": [] } } });

		assert_eq!(parse_table(&json).expect("parse failed"), None);
	}

	#[test]
	fn search_queries_share_one_fragment() {
		let fragment = candidate_fields!();

		assert!(SEARCH_QUERY.ends_with(fragment));
		assert!(SLUG_QUERY.ends_with(fragment));
	}
}
