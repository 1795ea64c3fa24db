//! Fixtures shared by the lupa test suites.

use serde_json::{Map, Value};

use lupa_config::{Config, Enrichment, MetadataProviderConfig, Search, Service};
use lupa_domain::catalog::{CandidateRecord, DatasetStructure, TableDetails, TableSummary};

/// A valid config pointing at `api_base`, with a short HTTP timeout.
pub fn sample_config(api_base: &str) -> Config {
	let mut default_headers = Map::new();

	default_headers.insert("User-Agent".to_string(), Value::String("lupa-tests".to_string()));

	Config {
		service: Service { log_level: "debug".to_string() },
		metadata: MetadataProviderConfig {
			api_base: api_base.trim_end_matches('/').to_string(),
			path: "/graphql".to_string(),
			timeout_ms: 5_000,
			default_headers,
		},
		search: Search::default(),
		enrichment: Enrichment::default(),
	}
}

pub fn candidate(id: &str, name: &str, slug: &str, description: &str) -> CandidateRecord {
	CandidateRecord {
		id: id.to_string(),
		name: name.to_string(),
		slug: slug.to_string(),
		description: description.to_string(),
		..Default::default()
	}
}

pub fn table(name: &str, column_count: u32) -> TableSummary {
	TableSummary { name: name.to_string(), slug: name.to_lowercase(), column_count }
}

/// Dataset node as the catalog serves it, with a `DatasetNode:` id prefix.
pub fn dataset_node(record: &CandidateRecord) -> Value {
	serde_json::json!({
		"id": format!("DatasetNode:{}", record.id),
		"name": record.name,
		"slug": record.slug,
		"description": record.description,
		"organizations": named_connection(&record.organization_names),
		"themes": named_connection(&record.theme_names),
		"tags": named_connection(&record.tag_names),
		"tables": {
			"edges": record.table_summaries.iter().map(|table| serde_json::json!({
				"node": {
					"name": table.name,
					"slug": table.slug,
					"columns": column_connection(table.column_count),
				}
			})).collect::<Vec<_>>()
		}
	})
}

pub fn details_node(structure: &DatasetStructure) -> Value {
	serde_json::json!({
		"id": format!("DatasetNode:{}", structure.id),
		"organizations": named_connection(&structure.organization_names),
		"themes": named_connection(&structure.theme_names),
		"tags": named_connection(&structure.tag_names),
		"tables": {
			"edges": structure.tables.iter().map(|table| serde_json::json!({
				"node": {
					"name": table.name,
					"slug": table.slug,
					"columns": column_connection(table.column_count),
					"cloudTables": {
						"edges": table.cloud_tables.iter().map(|cloud| serde_json::json!({
							"node": {
								"gcpProjectId": cloud.gcp_project_id,
								"gcpDatasetId": cloud.gcp_dataset_id,
								"gcpTableId": cloud.gcp_table_id,
							}
						})).collect::<Vec<_>>()
					}
				}
			})).collect::<Vec<_>>()
		}
	})
}

/// Table node with `TableNode:` and `DatasetNode:` prefixed ids.
pub fn table_node(table: &TableDetails) -> Value {
	serde_json::json!({
		"id": format!("TableNode:{}", table.id),
		"name": table.name,
		"slug": table.slug,
		"description": table.description,
		"dataset": {
			"id": format!("DatasetNode:{}", table.dataset.id),
			"name": table.dataset.name,
			"slug": table.dataset.slug,
		},
		"columns": {
			"edges": table.columns.iter().map(|column| serde_json::json!({
				"node": {
					"id": format!("ColumnNode:{}", column.id),
					"name": column.name,
					"description": column.description,
					"bigqueryType": column
						.data_type
						.as_ref()
						.map(|name| serde_json::json!({ "name": name })),
				}
			})).collect::<Vec<_>>()
		},
		"cloudTables": {
			"edges": table.cloud_tables.iter().map(|cloud| serde_json::json!({
				"node": {
					"gcpProjectId": cloud.gcp_project_id,
					"gcpDatasetId": cloud.gcp_dataset_id,
					"gcpTableId": cloud.gcp_table_id,
				}
			})).collect::<Vec<_>>()
		}
	})
}

/// Wraps nodes in the `data.allDataset.edges` envelope.
pub fn datasets_response(nodes: Vec<Value>) -> Value {
	let edges: Vec<Value> =
		nodes.into_iter().map(|node| serde_json::json!({ "node": node })).collect();

	serde_json::json!({ "data": { "allDataset": { "edges": edges } } })
}

pub fn tables_response(nodes: Vec<Value>) -> Value {
	let edges: Vec<Value> =
		nodes.into_iter().map(|node| serde_json::json!({ "node": node })).collect();

	serde_json::json!({ "data": { "allTable": { "edges": edges } } })
}

pub fn errors_response(messages: &[&str]) -> Value {
	let errors: Vec<Value> =
		messages.iter().map(|message| serde_json::json!({ "message": message })).collect();

	serde_json::json!({ "errors": errors })
}

fn named_connection(names: &[String]) -> Value {
	let edges: Vec<Value> =
		names.iter().map(|name| serde_json::json!({ "node": { "name": name } })).collect();

	serde_json::json!({ "edges": edges })
}

fn column_connection(column_count: u32) -> Value {
	let edges: Vec<Value> = (0..column_count)
		.map(|idx| serde_json::json!({ "node": { "id": format!("c{idx}") } }))
		.collect();

	serde_json::json!({ "edges": edges })
}
